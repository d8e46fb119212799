use std::fs;
use std::io::Write;
use std::path::Path;

use letter_count_core::strategy::{process, sequential, threaded};
use letter_count_core::{
    Alphabet, Corpus, Error, FrequencyTable, Generator, Settings, Strategy, WorkerCommand, report,
};
use quickcheck::{QuickCheck, TestResult};

/// Settings whose process strategy re-invokes the built binary.
fn settings(chunk_size: usize, workers: usize) -> Settings {
    let mut settings = Settings::default();
    settings.set_chunk_size(chunk_size).unwrap();
    settings.set_workers(workers).unwrap();
    settings.worker = Some(WorkerCommand::new(env!("CARGO_BIN_EXE_letter-count")).arg("worker"));
    settings
}

fn corpus_in(dir: &Path, contents: &[u8]) -> Corpus {
    let path = dir.join("corpus.txt");
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    Corpus::load(&path).unwrap()
}

#[test_log::test]
fn aaab_all_strategies_agree() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = corpus_in(dir.path(), b"AAAB");

    let report = report::run(&corpus, &settings(1, 3), &Strategy::ALL).unwrap();

    assert_eq!(report.results.len(), 3);
    for result in &report.results {
        assert_eq!(result.table.get('A'), 3, "{} miscounted A", result.strategy);
        assert_eq!(result.table.get('B'), 1, "{} miscounted B", result.strategy);
        assert_eq!(result.table.letters_total(), 4);
    }
}

#[test]
fn empty_corpus_is_all_zero_for_every_strategy() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = corpus_in(dir.path(), b"");
    let settings = settings(10, 4);

    for strategy in Strategy::ALL {
        let table = strategy.count(&corpus, &settings).unwrap();
        assert_eq!(table, FrequencyTable::new(), "{strategy} should count nothing");
    }
}

#[test]
fn million_random_letters_match_sequential_baseline() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings(100_000, 4);
    settings.length = 1_000_000;
    settings.seed = Some(99);
    settings.corpus_path = dir.path().join("million.txt");

    let corpus = Corpus::generate(&settings).unwrap();
    let baseline = sequential::count(&corpus, &settings).unwrap();

    assert_eq!(baseline.letters_total(), 1_000_000);
    assert_eq!(baseline.other(), 0);
    assert_eq!(threaded::count(&corpus, &settings).unwrap(), baseline);
    assert_eq!(process::count(&corpus, &settings).unwrap(), baseline);
}

#[test]
fn process_counting_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = corpus_in(dir.path(), &b"AABBBCCCCDDDD".repeat(100));
    let settings = settings(10, 3);

    let first = process::count(&corpus, &settings).unwrap();
    let second = process::count(&corpus, &settings).unwrap();

    assert_eq!(first, second);
    assert_eq!((first.get('A'), first.get('B'), first.get('C'), first.get('D')), (200, 300, 400, 400));
}

#[test]
fn process_strategy_detects_truncated_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = corpus_in(dir.path(), b"ABCDEFGHIJ");
    fs::write(corpus.path(), b"ABC").unwrap();

    let result = process::count(&corpus, &settings(4, 2));
    assert!(matches!(result, Err(Error::Worker { .. })));
}

#[test]
fn generated_corpus_sums_to_its_length() {
    let dir = tempfile::tempdir().unwrap();
    for length in [1_u64, 17, 4_096] {
        let mut settings = settings(100, 3);
        settings.length = length;
        settings.alphabet = "A,B,C,D".parse::<Alphabet>().unwrap();
        settings.corpus_path = dir.path().join(format!("corpus-{length}.txt"));

        let corpus = Corpus::generate(&settings).unwrap();
        let report = report::run(&corpus, &settings, &Strategy::ALL).unwrap();
        let baseline = report.baseline().unwrap();

        assert_eq!(baseline.letters_total(), length);
        assert!(baseline.iter().all(|(letter, _)| "ABCD".contains(letter)));
    }
}

#[test]
fn process_matches_sequential_for_arbitrary_corpora() {
    fn prop(bytes: Vec<u8>, chunk_size: u8, workers: u8) -> TestResult {
        let dir = tempfile::tempdir().unwrap();
        let corpus = corpus_in(dir.path(), &bytes);
        let settings = settings(chunk_size as usize + 1, workers as usize % 3 + 1);

        let expected = FrequencyTable::count_bytes(&bytes);
        TestResult::from_bool(process::count(&corpus, &settings).unwrap() == expected)
    }

    QuickCheck::new().tests(20).quickcheck(prop as fn(Vec<u8>, u8, u8) -> TestResult);
}

#[test]
fn seeded_generator_feeds_identical_corpora() {
    let dir = tempfile::tempdir().unwrap();
    let letters = Generator::with_seed(Alphabet::default(), 5).generate(2_000);
    let corpus = corpus_in(dir.path(), &letters);

    let table = process::count(&corpus, &settings(128, 2)).unwrap();
    assert_eq!(table, FrequencyTable::count_bytes(&letters));
}

#[test]
fn rewritten_corpus_fails_consistency_check() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = corpus_in(dir.path(), b"AAAB");
    fs::write(corpus.path(), b"ZZZZ").unwrap();

    let result = report::run(&corpus, &settings(2, 2), &Strategy::ALL);
    match result {
        Err(Error::Mismatch { strategy, expected, actual }) => {
            assert_eq!(strategy, "process");
            assert_eq!(*expected, FrequencyTable::count_bytes(b"AAAB"));
            assert_eq!(*actual, FrequencyTable::count_bytes(b"ZZZZ"));
        }
        other => panic!("expected a mismatch, got {other:?}"),
    }
}
