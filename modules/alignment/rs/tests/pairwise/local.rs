use eyre::Result;

use tracecall_alignment_rs::pairwise::{scoring, sw, Op};
use tracecall_core_rs::seq;

type Engine = sw::Engine<i32>;

struct Workload<'a> {
    seq1: (&'a [u8], usize),
    seq2: (&'a [u8], usize),
    score: i32,
    rle: &'a str,
}

fn ensure(engine: &mut Engine, w: Workload<'_>) -> Result<()> {
    let result = engine.align(w.seq1.0, w.seq2.0)?;
    assert_eq!(result.seq1().start, w.seq1.1, "{:?}", result);
    assert_eq!(result.seq2().start, w.seq2.1, "{:?}", result);
    assert_eq!(*result.score(), w.score);
    assert_eq!(result.rle(), w.rle);

    // Ends are consistent with the steps
    let (consumed1, consumed2) = result
        .steps()
        .iter()
        .map(|x| {
            let (s1, s2) = x.op().consumes();
            (s1 * *x.len() as usize, s2 * *x.len() as usize)
        })
        .fold((0, 0), |acc, x| (acc.0 + x.0, acc.1 + x.1));
    assert_eq!(result.seq1().len(), consumed1);
    assert_eq!(result.seq2().len(), consumed2);
    Ok(())
}

#[test]
fn test_empty() -> Result<()> {
    let mut engine = Engine::default();
    let workload: Vec<(&[u8], &[u8])> = vec![
        (b"ACGT", b""),
        (b"", b"ACGT"),
        (b"", b""),
        (b"AAAA", b"CCCC"),
        (b"_", b"A"),
    ];

    for (seq1, seq2) in workload {
        let result = engine.align(seq1, seq2)?;
        assert!(result.is_empty());
        assert_eq!(*result.score(), 0);
        assert_eq!(result.rle(), "");
        assert!(result.map().is_empty());
        assert_eq!(result.map().reference_len(), seq1.len());
    }
    Ok(())
}

#[test]
fn test_no_gaps() -> Result<()> {
    let mut engine = Engine::default();
    let workload = vec![
        Workload {
            seq1: (b"AAGAA", 1),
            seq2: (b"AGA", 0),
            score: 6,
            rle: "3=",
        },
        Workload {
            seq1: (b"AGTCCCGTGTCCCAGGGG", 0),
            seq2: (b"AGTC", 0),
            score: 8,
            rle: "4=",
        },
        Workload {
            seq1: (b"AAAGGGAGGGTTTA", 3),
            seq2: (b"GGGGGGG", 0),
            score: 11,
            rle: "3=1X3=",
        },
        Workload {
            seq1: (b"AAAA", 0),
            seq2: (b"AAAA", 0),
            score: 8,
            rle: "4=",
        },
    ];
    for w in workload {
        ensure(&mut engine, w)?;
    }
    Ok(())
}

#[test]
fn test_gaps() -> Result<()> {
    let mut engine = Engine::default();
    let workload = vec![
        // Extra base in the reference
        Workload {
            seq1: (b"ACGTACGGTCTCATGCCAGTA", 0),
            seq2: (b"ACGTACGGTCCATGCCAGTA", 0),
            score: 38,
            rle: "10=1^10=",
        },
        // Extra base in the query
        Workload {
            seq1: (b"ACGTACGGTCCATGCCAGTA", 0),
            seq2: (b"ACGTACGGTCTCATGCCAGTA", 0),
            score: 38,
            rle: "10=1v10=",
        },
    ];
    for w in workload {
        ensure(&mut engine, w)?;
    }
    Ok(())
}

#[test]
fn test_map_skips_indels() -> Result<()> {
    let mut engine = Engine::default();
    let result = engine.align(b"ACGTACGGTCTCATGCCAGTA", b"ACGTACGGTCCATGCCAGTA")?;

    let map = result.map();
    assert_eq!(map.len(), 20);
    assert_eq!(map.get(9), Some(9));
    assert_eq!(map.get(10), None);
    assert_eq!(map.get(11), Some(10));
    assert_eq!(map.get(20), Some(19));

    let pairs = map.iter().collect::<Vec<_>>();
    assert!(pairs.windows(2).all(|x| x[0].0 < x[1].0 && x[0].1 < x[1].1));
    Ok(())
}

#[test]
fn test_homopolymer_gap_is_leftmost() -> Result<()> {
    let mut engine = Engine::default();

    // Any of the four Ts could be the deleted one, the traceback prefers diagonal steps from
    // the end and leaves the gap on the first T
    let result = engine.align(b"GACTTTTGCA", b"GACTTTGCA")?;
    assert_eq!(*result.score(), 16);
    assert_eq!(*result.seq1(), 0..10);
    assert_eq!(*result.seq2(), 0..9);
    assert_eq!(result.rle(), "3=1^6=");
    assert_eq!(
        result.map().iter().collect::<Vec<_>>(),
        vec![(0, 0), (1, 1), (2, 2), (4, 3), (5, 4), (6, 5), (7, 6), (8, 7), (9, 8)]
    );
    assert_eq!(result.map().get(3), None);

    // Same placement for an extra T in the query
    let result = engine.align(b"GACTTTGCA", b"GACTTTTGCA")?;
    assert_eq!(*result.score(), 16);
    assert_eq!(result.rle(), "3=1v6=");
    assert_eq!(result.map().get(2), Some(2));
    assert_eq!(result.map().get(3), Some(4));
    assert_eq!(result.map().len(), 9);
    Ok(())
}

#[test]
fn test_mismatches_are_mapped() -> Result<()> {
    let mut engine = Engine::default();
    let result = engine.align(b"AAAGGGAGGGTTTA", b"GGGGGGG")?;
    assert_eq!(result.map().len(), 7);
    assert_eq!(result.map().get(6), Some(3));
    assert_eq!(*result.steps()[1].op(), Op::Mismatch);
    Ok(())
}

#[test]
fn test_reverse_complement_query() -> Result<()> {
    let reference = b"TTGACCGTAGGCATCGATCGGATCCAGTGACTTGCA";
    let query = seq::reverse_complement(&reference[5..30]);

    let mut engine = Engine::default();
    let direct = engine.align(reference, &query)?;
    let flipped = engine.align(reference, &seq::reverse_complement(&query))?;
    assert!(flipped.score() > direct.score());
    assert_eq!(*flipped.score(), 50);
    assert_eq!(*flipped.seq1(), 5..30);
    assert_eq!(flipped.rle(), "25=");
    Ok(())
}

#[test]
fn test_narrow_score_type() -> Result<()> {
    let reference = b"GATTACAGATTACACCGGTTAACCGGTTAA";
    let query = b"ACAGATTACACCGG";

    let wide = sw::Engine::<i32>::default().align(reference, query)?;
    let narrow = sw::Engine::<i16>::new(scoring::Linear::default()).align(reference, query)?;
    assert_eq!(*narrow.score() as i32, *wide.score());
    assert_eq!(narrow.seq1(), wide.seq1());
    assert_eq!(narrow.map(), wide.map());
    Ok(())
}
