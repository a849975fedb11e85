use grimoire_primitives::DataVariant;
use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::records::{SpellData, TalentData};

fn spells(ids: &[u32]) -> Vec<SpellData> {
	ids.iter().map(|&id| SpellData::new(id, "")).collect()
}

fn index(ids: &[u32]) -> Index<SpellData> {
	Index::build("spell", DataVariant::Primary, spells(ids)).unwrap()
}

#[rstest]
#[case(3, None)]
#[case(5, Some(5))]
#[case(9, Some(9))]
#[case(0, None)]
#[case(10, None)]
fn lookup_in_terminated_table(#[case] id: u32, #[case] expected: Option<u32>) {
	let idx = index(&[1, 5, 9, 0]);
	let found = idx.lookup(id);
	match expected {
		Some(want) => assert_eq!(found.id, want),
		None => assert!(found.is_not_found()),
	}
}

#[test]
fn rows_after_terminator_are_discarded() {
	let idx = index(&[1, 5, 0, 7, 8]);
	assert_eq!(idx.len(), 2);
	assert_eq!(idx.max_id(), 5);
	assert!(idx.lookup(7).is_not_found());
}

#[test]
fn terminator_is_optional() {
	let idx = index(&[2, 4]);
	assert_eq!(idx.len(), 2);
	assert_eq!(idx.position(4), Some(1));
	assert_eq!(idx.get(0).map(|s| s.id), Some(2));
}

#[test]
fn unsorted_table_is_rejected() {
	let err = Index::build("spell", DataVariant::Alternate, spells(&[1, 9, 5])).unwrap_err();
	assert_eq!(
		err,
		TableError::Unsorted {
			label: "spell",
			variant: DataVariant::Alternate,
			row: 2,
			id: 5,
			prev: 9,
		}
	);
}

#[test]
fn duplicate_id_is_rejected() {
	let err = Index::build("spell", DataVariant::Primary, spells(&[1, 5, 5])).unwrap_err();
	assert!(matches!(err, TableError::Duplicate { id: 5, row: 2, .. }));
}

#[test]
fn empty_table_looks_up_nothing() {
	let idx = Index::<SpellData>::empty("spell", DataVariant::Primary);
	assert!(idx.is_empty());
	assert_eq!(idx.max_id(), 0);
	assert!(idx.lookup(1).is_not_found());
}

#[test]
fn filtered_index_lookup_and_find_first() {
	let talents = vec![
		TalentData::new(3, "Alpha", 30),
		TalentData::new(4, "", 40),
		TalentData::new(8, "Beta", 80),
		TalentData::new(9, "Alpha", 90),
	];
	let idx = Index::build("talent", DataVariant::Primary, talents).unwrap();
	let named = FilteredIndex::build(&idx, |t| !t.name.is_empty());

	assert_eq!(named.len(), 3);
	assert!(named.lookup(4).is_not_found(), "filtered out");
	assert_eq!(named.lookup(8).name, "Beta");
	assert_eq!(named.find_first(|t| t.name == "Alpha").id, 3);
	assert!(named.find_first(|t| t.name == "Gamma").is_not_found());
}

proptest! {
	#[test]
	fn every_present_id_looks_up_to_itself(ids in prop::collection::btree_set(1u32..100_000, 0..200)) {
		let ids: Vec<u32> = ids.into_iter().collect();
		let idx = index(&ids);
		for &id in &ids {
			prop_assert_eq!(idx.lookup(id).id, id);
		}
	}

	#[test]
	fn absent_ids_yield_not_found(ids in prop::collection::btree_set(1u32..1000, 0..100), probe in 0u32..1000) {
		let ids: Vec<u32> = ids.into_iter().collect();
		let idx = index(&ids);
		prop_assume!(!ids.contains(&probe));
		prop_assert!(idx.lookup(probe).is_not_found());
	}
}
