//! Property-based tests for the state layer invariants
//!
//! - Round trip: encode then decode yields the original entity
//! - Index discipline: insertion order preserved, duplicates tolerated
//! - Master list: single-key registrations deduplicate, batches do not

use ledger_state::{
    codec, Company, CompanyId, CompanyType, Contract, ContractStatus, IndexScheme, MemoryStore,
    Repository,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Strategy for positive decimal amounts with up to 3 fractional digits
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|millis| Decimal::new(millis, 3))
}

/// Strategy for company IDs
fn company_id_strategy() -> impl Strategy<Value = CompanyId> {
    "[A-Z]{4,12}[0-9]{1,2}".prop_map(CompanyId::new)
}

/// Strategy for company types
fn company_type_strategy() -> impl Strategy<Value = CompanyType> {
    prop_oneof![
        Just(CompanyType::Producer),
        Just(CompanyType::Shipper),
        Just(CompanyType::Transporter),
        Just(CompanyType::Buyer),
    ]
}

fn company_strategy() -> impl Strategy<Value = Company> {
    (
        company_id_strategy(),
        company_type_strategy(),
        "[A-Za-z ]{1,24}",
        amount_strategy(),
        0i64..2_000_000_000_000i64,
    )
        .prop_map(|(id, company_type, name, bank_balance, balance_date_ms)| Company {
            id,
            company_type,
            name,
            location: "Europe".to_string(),
            bank_balance,
            balance_date_ms,
        })
}

fn contract_strategy() -> impl Strategy<Value = Contract> {
    (
        1i64..1_000_000i64,
        company_id_strategy(),
        company_id_strategy(),
        amount_strategy(),
    )
        .prop_map(|(id, initiator_id, receiver_id, energy_mwh)| Contract {
            id,
            initiator_id,
            receiver_id,
            energy_mwh,
            entry_location: "Europe".to_string(),
            start_date: "1/1/2018".to_string(),
            end_date: "1/2/2018".to_string(),
            status: ContractStatus::New,
        })
}

fn test_repo() -> Repository {
    Repository::new(Arc::new(MemoryStore::new()), IndexScheme::default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: companies survive the codec unchanged
    #[test]
    fn prop_company_roundtrip(company in company_strategy()) {
        let bytes = codec::encode(&company).unwrap();
        let decoded: Company = codec::decode(&bytes).unwrap();
        prop_assert_eq!(decoded, company);
    }

    /// Property: contracts survive the codec unchanged
    #[test]
    fn prop_contract_roundtrip(contract in contract_strategy()) {
        let bytes = codec::encode(&contract).unwrap();
        let decoded: Contract = codec::decode(&bytes).unwrap();
        prop_assert_eq!(decoded, contract);
    }

    /// Property: a per-type index replays its appends in order, including
    /// duplicates
    #[test]
    fn prop_index_preserves_insertion_order(
        ids in prop::collection::vec("[0-9]{1,6}", 1..20)
    ) {
        let repo = test_repo();
        for id in &ids {
            repo.append_to_index("TRADEREQUESTIDLIST", id).unwrap();
        }

        prop_assert_eq!(repo.list("TRADEREQUESTIDLIST").unwrap(), ids);
    }

    /// Property: registering the same key one at a time never duplicates it
    #[test]
    fn prop_master_single_key_dedup(key in "[A-Z0-9_]{1,16}", times in 2usize..6) {
        let repo = test_repo();
        for _ in 0..times {
            repo.register_keys(&[key.clone()]).unwrap();
        }

        prop_assert_eq!(repo.master_keys().unwrap(), vec![key]);
    }

    /// Property: batch registration appends verbatim, duplicates included
    #[test]
    fn prop_master_batch_no_dedup(
        keys in prop::collection::vec("[A-Z]{1,8}", 2..10)
    ) {
        let repo = test_repo();
        repo.register_keys(&keys).unwrap();
        repo.register_keys(&keys).unwrap();

        let mut expected = keys.clone();
        expected.extend_from_slice(&keys);
        prop_assert_eq!(repo.master_keys().unwrap(), expected);
    }

    /// Property: every created company is reachable through the company list
    #[test]
    fn prop_created_companies_enumerable(
        companies in prop::collection::vec(company_strategy(), 1..8)
    ) {
        let repo = test_repo();
        for company in &companies {
            repo.create_company(company).unwrap();
        }

        let listed = repo.list("COMPANYIDLIST").unwrap();
        prop_assert_eq!(listed.len(), companies.len());
        for (key, company) in listed.iter().zip(&companies) {
            let stored: Company = repo.get(key).unwrap().unwrap();
            prop_assert_eq!(&stored.id, &company.id);
        }
    }
}
