use insta::assert_debug_snapshot;
use lazyseq_core::{chunkwise, pairwise, ChunkOptions, Error, SequenceExt};

#[test]
fn test_windowing_coverage() {
    let overlapping = chunkwise(1..=5, 2, 1, true).unwrap().collect::<Vec<_>>();
    assert_eq!(overlapping, vec![vec![1, 2], vec![2, 3], vec![3, 4], vec![4, 5]]);

    let chunks = chunkwise(1..=5, 2, 0, true).unwrap().collect::<Vec<_>>();
    assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);

    assert_eq!(pairwise([1].into_iter()).count(), 0);
}

#[test]
fn test_window_over_text() {
    let words = "the quick brown fox jumps".split(' ');
    let windows = words
        .chunkwise(ChunkOptions::new(3).overlap(2).include_trailing(false))
        .unwrap()
        .collect::<Vec<_>>();
    assert_debug_snapshot!(windows, @r###"
    [
        [
            "the",
            "quick",
            "brown",
        ],
        [
            "quick",
            "brown",
            "fox",
        ],
        [
            "brown",
            "fox",
            "jumps",
        ],
    ]
    "###);
}

#[test]
fn test_configuration_errors_before_pulling() {
    let mut pulled = false;
    let source = std::iter::from_fn(|| {
        pulled = true;
        Some(1)
    });
    assert_eq!(chunkwise(source, 2, 5, true).err(), Some(Error::InvalidOverlap));
    assert!(!pulled);
}

#[test]
fn test_infinite_source() {
    let pairs = (0..).pairwise().take(3).collect::<Vec<_>>();
    assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3)]);
}
