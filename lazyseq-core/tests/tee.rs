use std::rc::Rc;

use lazyseq_core::{tee, Error, SequenceExt};

#[test]
fn test_tee_fidelity_sequential() {
    for count in 1..5 {
        let branches = tee(0..20, count).unwrap();
        for branch in branches {
            assert_eq!(branch.collect::<Vec<_>>(), (0..20).collect::<Vec<_>>());
        }
    }
}

#[test]
fn test_tee_fidelity_round_robin_uneven() {
    let mut branches = tee(0..50, 3).unwrap();
    let mut outputs = vec![Vec::new(); 3];
    // branch i advances i + 1 steps per round
    loop {
        let mut progressed = false;
        for (i, branch) in branches.iter_mut().enumerate() {
            for _ in 0..=i {
                if let Some(item) = branch.next() {
                    outputs[i].push(item);
                    progressed = true;
                }
            }
        }
        if !progressed {
            break;
        }
    }
    for output in outputs {
        assert_eq!(output, (0..50).collect::<Vec<_>>());
    }
}

#[test]
fn test_tee_of_tee() {
    let mut outer = tee(0..4, 2).unwrap();
    let first = outer.remove(0);
    let inner = first.tee(2).unwrap();
    for branch in inner {
        assert_eq!(branch.collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }
    assert_eq!(outer.remove(0).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
}

#[test]
fn test_tee_zero_is_configuration_error() {
    let error = tee(0..3, 0).err().unwrap();
    assert_eq!(error, Error::InvalidTeeCount);
    assert_eq!(error.kind(), lazyseq_core::ErrorKind::Configuration);
}

#[test]
fn test_tee_does_not_pull_until_asked() {
    let mut pulled = 0;
    {
        let source = std::iter::from_fn(|| {
            pulled += 1;
            Some(1)
        });
        let mut branches = tee(source, 2).unwrap();
        assert_eq!(branches[0].next(), Some(1));
        assert_eq!(branches[1].next(), Some(1));
    }
    assert_eq!(pulled, 1);
}

#[test]
fn test_buffer_freed_when_all_branches_dropped() {
    let token = Rc::new(());
    let source = vec![token.clone(); 5];
    let mut branches = tee(source.into_iter(), 3).unwrap();
    // the first branch reads ahead, so the other two keep its elements buffered
    let read = branches[0].by_ref().take(3).collect::<Vec<_>>();
    drop(read);
    assert_eq!(branches[1].buffered(), 3);
    // three buffered plus two still in the source
    assert_eq!(Rc::strong_count(&token), 6);

    let last = branches.pop().unwrap();
    drop(branches);
    assert_eq!(last.buffered(), 3);
    drop(last);
    assert_eq!(Rc::strong_count(&token), 1);
}
