#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use fcomp_core::Identifier;
use fcomp_router::{
    PresentCompletion, RoutePresenter, RouteSegment, Router, Screen, ScreenRef, WindowRef,
};
use libfuzzer_sys::fuzz_target;

const NAMES: [&str; 6] = ["a", "b", "c", "d", "e", "missing"];

struct Blank(&'static str);

impl Screen for Blank {
    fn name(&self) -> &str {
        self.0
    }
}

/// Succeeds unless the screen is named `d`.
struct Picky(Identifier);

impl RoutePresenter for Picky {
    fn identifier(&self) -> &Identifier {
        &self.0
    }

    fn present(
        &self,
        screen: &ScreenRef,
        _parent: Option<&ScreenRef>,
        _window: Option<&WindowRef>,
        completion: PresentCompletion,
    ) {
        if screen.name() == "d" {
            completion.fail();
        } else {
            completion.succeed();
        }
    }
}

#[derive(Debug, Arbitrary)]
enum Op {
    Execute(Vec<u8>),
    Append(Vec<u8>),
}

fn path(indices: &[u8]) -> Vec<Identifier> {
    indices
        .iter()
        .take(8)
        .map(|i| Identifier::from(NAMES[usize::from(*i) % NAMES.len()]))
        .collect()
}

fuzz_target!(|ops: Vec<Op>| {
    let mut router = Router::new(None);
    router.register_presenter(Arc::new(Picky(Identifier::from("picky"))));
    for name in &NAMES[..5] {
        router.register_segment(RouteSegment::new(*name, "picky", move || {
            Some(Arc::new(Blank(name)) as ScreenRef)
        }));
    }

    for op in ops.into_iter().take(32) {
        let before = router.active_path();
        let (target, result) = match op {
            Op::Execute(indices) => {
                let target = path(&indices);
                let result = router.execute_route(&target);
                (target, result)
            }
            Op::Append(indices) => {
                let suffix = path(&indices);
                let mut target = before.clone();
                target.extend(suffix.iter().cloned());
                (target, router.append_route(&suffix))
            }
        };

        match result {
            Ok(_) => assert_eq!(router.active_path(), target),
            Err(_) => assert_eq!(router.active_path(), before),
        }
        assert_eq!(router.screens().len(), router.active_path().len());
    }
});
