//! Property-based pagination checks over arbitrary datasets.

mod common;

use common::assert_no_transients;
use foliodb::{
    paginate, DocId, Document, DocumentStore, MemoryEngine, PageQuery, Predicate, Strategy,
};
use proptest::prelude::*;

fn dataset(ages: &[i64]) -> MemoryEngine {
    let engine = MemoryEngine::new();
    let docs = ages
        .iter()
        .enumerate()
        .map(|(i, age)| Document::new(i as i64).with("age", *age))
        .collect();
    engine.insert_bulk("rows", docs).unwrap();
    engine
}

fn collect_all_pages(engine: &MemoryEngine, page_size: u64, strategy: Strategy) -> Vec<(i64, i64)> {
    let mut out = Vec::new();
    let mut page_index = 0;
    loop {
        let query = PageQuery::new("rows", Predicate::All, "age")
            .unwrap()
            .page(page_index, page_size)
            .strategy(strategy);
        let page: Vec<Document> = paginate(engine, &query).unwrap();
        if page.is_empty() {
            break;
        }
        out.extend(page.iter().map(|d| {
            let id = match d.id() {
                DocId::Int(n) => *n,
                _ => unreachable!(),
            };
            (id, d.get("age").unwrap().as_int().unwrap())
        }));
        page_index += 1;
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn pages_reassemble_the_sorted_match_set(
        ages in proptest::collection::vec(0i64..50, 0..120),
        page_size in 1u64..20,
    ) {
        let engine = dataset(&ages);

        for strategy in [Strategy::FullCopy, Strategy::ProjectedCopy] {
            let paged = collect_all_pages(&engine, page_size, strategy);

            // every row exactly once
            prop_assert_eq!(paged.len(), ages.len());
            let mut ids: Vec<i64> = paged.iter().map(|(id, _)| *id).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), ages.len());

            // ages are nondecreasing across page boundaries
            for pair in paged.windows(2) {
                prop_assert!(pair[0].1 <= pair[1].1);
            }
        }
        assert_no_transients(&engine);
    }

    #[test]
    fn page_count_matches_ceiling_division(
        ages in proptest::collection::vec(0i64..10, 1..80),
        page_size in 1u64..12,
    ) {
        let engine = dataset(&ages);
        let paged = collect_all_pages(&engine, page_size, Strategy::FullCopy);
        prop_assert_eq!(paged.len(), ages.len());

        let total = ages.len() as u64;
        let nonempty_pages = (total + page_size - 1) / page_size;
        // the page right after the last nonempty one is empty
        let query = PageQuery::new("rows", Predicate::All, "age")
            .unwrap()
            .page(nonempty_pages, page_size);
        let past: Vec<Document> = paginate(&engine, &query).unwrap();
        prop_assert!(past.is_empty());
    }
}
