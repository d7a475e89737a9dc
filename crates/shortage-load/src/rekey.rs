//! Re-keying contacts from package codes to shortage surrogate ids.
//!
//! Source contacts are keyed by `package_ndc`, but the destination schema
//! links contacts to shortages by the numeric `shortage_id`. Several
//! shortage rows can share one package code; the mapping picks the minimum
//! id per code as the deterministic tie-break. Both steps are pure so they
//! can be tested without a database.

use std::collections::BTreeMap;

use shortage_model::{RekeyedContact, ShortageContact};

/// Collapse (package code, shortage id) pairs into a per-code mapping,
/// keeping the minimum id for each code.
pub fn min_id_mapping(pairs: impl IntoIterator<Item = (String, i64)>) -> BTreeMap<String, i64> {
    let mut mapping = BTreeMap::new();
    for (package_ndc, shortage_id) in pairs {
        mapping
            .entry(package_ndc)
            .and_modify(|id: &mut i64| *id = (*id).min(shortage_id))
            .or_insert(shortage_id);
    }
    mapping
}

/// Join contacts onto the id mapping by package code.
///
/// Contacts whose package code has no matching shortage are dropped; the
/// required foreign key cannot be satisfied for them.
pub fn rekey_contacts(
    mapping: &BTreeMap<String, i64>,
    contacts: &[ShortageContact],
) -> Vec<RekeyedContact> {
    contacts
        .iter()
        .filter_map(|contact| {
            mapping
                .get(&contact.package_ndc)
                .map(|&shortage_id| RekeyedContact {
                    shortage_id,
                    contact_info: contact.contact_info.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn contact(package_ndc: &str, contact_info: &str) -> ShortageContact {
        ShortageContact {
            package_ndc: package_ndc.into(),
            contact_info: contact_info.into(),
        }
    }

    #[test]
    fn picks_minimum_id_per_package() {
        let mapping = min_id_mapping(vec![
            ("A".to_string(), 10),
            ("A".to_string(), 11),
            ("B".to_string(), 20),
        ]);
        let rekeyed = rekey_contacts(&mapping, &[contact("A", "x")]);

        assert_eq!(rekeyed.len(), 1);
        assert_eq!(rekeyed[0].shortage_id, 10);
        assert_eq!(rekeyed[0].contact_info, "x");
    }

    #[test]
    fn minimum_wins_regardless_of_order() {
        let mapping = min_id_mapping(vec![("A".to_string(), 11), ("A".to_string(), 10)]);
        assert_eq!(mapping["A"], 10);
    }

    #[test]
    fn unmatched_contacts_are_dropped() {
        let mapping = min_id_mapping(vec![("B".to_string(), 20)]);
        let rekeyed = rekey_contacts(&mapping, &[contact("A", "x"), contact("B", "y")]);

        assert_eq!(rekeyed.len(), 1);
        assert_eq!(rekeyed[0].shortage_id, 20);
    }

    #[test]
    fn empty_inputs_produce_nothing() {
        let mapping = min_id_mapping(Vec::new());
        assert!(rekey_contacts(&mapping, &[]).is_empty());
        assert!(rekey_contacts(&mapping, &[contact("A", "x")]).is_empty());
    }

    proptest! {
        /// Every re-keyed contact references the smallest id recorded for
        /// its package code, and contacts are never invented or duplicated.
        #[test]
        fn rekey_references_minimum(
            pairs in prop::collection::vec(("[A-D]", 1i64..100), 0..20),
            packages in prop::collection::vec("[A-F]", 0..10),
        ) {
            let mapping = min_id_mapping(pairs.clone());
            let contacts: Vec<ShortageContact> = packages
                .iter()
                .map(|code| contact(code, "info"))
                .collect();
            let rekeyed = rekey_contacts(&mapping, &contacts);

            let expected: Vec<i64> = packages
                .iter()
                .filter_map(|code| {
                    pairs
                        .iter()
                        .filter(|(c, _)| c == code)
                        .map(|(_, id)| *id)
                        .min()
                })
                .collect();
            let got: Vec<i64> = rekeyed.iter().map(|row| row.shortage_id).collect();
            prop_assert_eq!(got, expected);
        }
    }
}
