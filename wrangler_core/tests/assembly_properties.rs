//! Property tests for sequence assembly

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use wrangler_core::{FileEntry, MediaItem, SequenceAssembler, assemble, materialize};

fn frame_name() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["a", "b/c"]),
        prop::sample::select(vec!["shot", "x_y", "p.v2"]),
        prop::sample::select(vec!['.', '_', '-']),
        0u64..40,
        1usize..4,
        prop::sample::select(vec![".png", ".EXR"]),
    )
        .prop_map(|(folder, base, sep, frame, padding, ext)| {
            format!("{folder}/{base}{sep}{frame:0padding$}{ext}")
        })
}

fn plain_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "a/notes.txt",
        "a/shot.png",
        "b/c/README",
        "b/c/take1.mov",
        "a/_7.png",
    ])
    .prop_map(str::to_string)
}

fn file_set() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(prop_oneof![4 => frame_name(), 1 => plain_name()], 0..60)
}

/// Frames of one key, each with its own separator and zero padding
fn loose_run() -> impl Strategy<Value = (&'static str, BTreeMap<u64, (char, usize)>)> {
    (
        prop::sample::select(vec!["shot", "x_y", "p.v2"]),
        prop::collection::btree_map(
            0u64..5000,
            (prop::sample::select(vec!['.', '_', '-']), 0usize..5),
            2..40,
        ),
    )
}

fn entries(names: &BTreeSet<String>) -> Vec<FileEntry> {
    names.iter().map(|name| FileEntry::from(name.as_str())).collect()
}

fn sorted(names: &BTreeSet<String>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = names.iter().map(PathBuf::from).collect();
    paths.sort();
    paths
}

fn flattened(items: &[MediaItem]) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = items.iter().flat_map(MediaItem::paths).collect();
    paths.sort();
    paths
}

proptest! {
    #[test]
    fn test_every_entry_appears_exactly_once(names in file_set(), min in 1usize..5) {
        let items = assemble(entries(&names), min).unwrap();

        prop_assert_eq!(flattened(&items), sorted(&names));
    }

    #[test]
    fn test_input_order_is_irrelevant(names in file_set(), rotation in 0usize..60) {
        let forward = entries(&names);
        let mut shuffled = forward.clone();
        shuffled.reverse();
        if !shuffled.is_empty() {
            let len = shuffled.len();
            shuffled.rotate_left(rotation % len);
        }

        let a = assemble(forward, 2).unwrap();
        let b = assemble(shuffled, 2).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn test_sequences_meet_threshold(names in file_set(), min in 1usize..5) {
        let assembly = SequenceAssembler::new(min).unwrap().assemble(entries(&names));

        for group in &assembly.sequences {
            prop_assert!(group.frame_count() >= min);
            prop_assert!(group.frames().windows(2).all(|w| w[0] < w[1]));
            prop_assert!(group.separator().is_some());
        }
    }

    #[test]
    fn test_demoting_everything_reproduces_names(names in file_set()) {
        let assembler = SequenceAssembler::new(usize::MAX).unwrap();
        let items = materialize(assembler.assemble(entries(&names)));

        prop_assert!(items.iter().all(MediaItem::is_file));
        prop_assert_eq!(flattened(&items), sorted(&names));
    }

    #[test]
    fn test_well_formed_run_is_one_sequence(
        base in prop::sample::select(vec!["shot", "x_y", "p.v2"]),
        sep in prop::sample::select(vec!['.', '_', '-']),
        start in 0u64..2000,
        len in 1u64..40,
        padding in 0usize..5,
        min in 1usize..5,
    ) {
        prop_assume!(len as usize >= min);
        let names: BTreeSet<String> = (start..start + len)
            .map(|frame| format!("shots/{base}{sep}{frame:0padding$}.exr"))
            .collect();

        let assembly = SequenceAssembler::new(min).unwrap().assemble(entries(&names));

        prop_assert_eq!(assembly.sequences.len(), 1);
        prop_assert!(assembly.standalone.is_empty());
        prop_assert!(assembly.warnings.is_empty());

        let group = &assembly.sequences[0];
        let expected = (start..start + len).collect::<Vec<_>>();
        prop_assert_eq!(group.frames(), expected.as_slice());
        let members: BTreeSet<PathBuf> = group.member_paths().into_iter().collect();
        prop_assert_eq!(members, names.iter().map(PathBuf::from).collect::<BTreeSet<_>>());
    }

    #[test]
    fn test_mixed_separators_and_widths_stay_together((base, run) in loose_run()) {
        let names: BTreeSet<String> = run
            .iter()
            .map(|(frame, &(sep, padding))| format!("shots/{base}{sep}{frame:0padding$}.exr"))
            .collect();

        let assembly = SequenceAssembler::default().assemble(entries(&names));

        prop_assert_eq!(assembly.sequences.len(), 1);
        prop_assert!(assembly.standalone.is_empty());
        prop_assert!(assembly.warnings.is_empty());

        let group = &assembly.sequences[0];
        let expected = run.keys().copied().collect::<Vec<_>>();
        prop_assert_eq!(group.frames(), expected.as_slice());
        let members: BTreeSet<PathBuf> = group.member_paths().into_iter().collect();
        prop_assert_eq!(members, names.iter().map(PathBuf::from).collect::<BTreeSet<_>>());

        // The first name in path order decides the reported separator
        let first = names.iter().next().unwrap();
        let first_sep = first.as_bytes()[format!("shots/{base}").len()] as char;
        prop_assert_eq!(group.separator().map(|s| s.as_char()), Some(first_sep));
    }
}
