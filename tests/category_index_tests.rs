use dinetree::*;
use log::{debug, info};
use test_util::{build_index, random_samples};

/// Walks the tree and asserts strict ascending order at every level.
fn assert_sorted(nodes: &[Node]) {
    for pair in nodes.windows(2) {
        assert!(
            pair[0].label() < pair[1].label(),
            "siblings out of order: {:?} before {:?}",
            pair[0].label(),
            pair[1].label()
        );
    }
    for node in nodes {
        assert_sorted(node.children());
    }
}

#[test]
fn test_sortedness_after_shuffled_inserts() {
    info!("[TEST] category_index sortedness");

    let samples = random_samples(300);
    let mut index = CategoryIndex::new();
    for (i, sample) in samples.iter().enumerate() {
        index
            .insert(&sample.path_refs(), sample.price, sample.rating, sample.original_index)
            .expect("insert");
        // Checked throughout the build, not only at the end
        if i % 50 == 0 {
            let top = index.lookup(&[]).expect("root level");
            assert_sorted(top);
            assert!(index.verify().is_ok());
        }
    }

    assert_sorted(index.lookup(&[]).expect("root level"));
    index.verify().expect("index invariants");
    debug!("index has {} nodes", index.len());
    info!("[TEST] sortedness held after {} inserts", samples.len());
}

#[test]
fn test_every_inserted_path_is_found() {
    info!("[TEST] category_index lookup correctness");

    let samples = random_samples(200);
    let index = build_index(&samples);

    for sample in &samples {
        for cuisine in split_labels(&sample.path[0]) {
            let path: [&str; 4] = [cuisine, &sample.path[1], &sample.path[2], &sample.path[3]];
            let leaves = index
                .find_restaurants(&path)
                .unwrap_or_else(|| panic!("path {path:?} should exist"));
            let leaf = leaves
                .iter()
                .find(|leaf| leaf.original_index == sample.original_index)
                .unwrap_or_else(|| panic!("restaurant {} missing under {path:?}", sample.original_index));
            assert_eq!(leaf.name, sample.path[4]);
            assert_eq!(leaf.price, sample.price);
            assert_eq!(leaf.rating, sample.rating);
        }
    }
    assert_eq!(index.restaurant_count(), samples.len());
}

#[test]
fn test_lookup_miss_on_unknown_prefix() {
    let index = build_index(&random_samples(50));

    assert!(index.lookup(&["Ethiopian"]).is_none());
    assert!(index.find_restaurants(&["Ethiopian", "Cafe", "No", "No"]).is_none());
    // Wrong value at the second level
    assert!(index.find_restaurants(&["Thai", "Fine Dining", "No", "No"]).is_none());
}

#[test]
fn test_multi_cuisine_leaves_share_payload() {
    let mut index = CategoryIndex::new();
    index
        .insert(&["Chinese,Thai", "Cafe", "No", "Yes", "Golden Lotus"], 9.6, 4.3, 42)
        .expect("insert");

    let chinese = index.find_restaurants(&["Chinese", "Cafe", "No", "Yes"]).expect("chinese");
    let thai = index.find_restaurants(&["Thai", "Cafe", "No", "Yes"]).expect("thai");
    assert_eq!(chinese.len(), 1);
    assert_eq!(chinese[0], thai[0]);
    assert_eq!(chinese[0].original_index, 42);
    assert_eq!(index.cuisines(), vec!["Chinese", "Thai"]);
}

#[test]
fn test_multi_valued_type_also_fans_out() {
    let mut index = CategoryIndex::new();
    index
        .insert(&["Cafe", "Cafe, Quick Bites", "No", "No", "Third Wave"], 6.4, 4.6, 5)
        .expect("insert");

    assert_eq!(index.dining_types(), vec!["Cafe", "Quick Bites"]);
    assert!(index.find_restaurants(&["Cafe", "Cafe", "No", "No"]).is_some());
    assert!(index.find_restaurants(&["Cafe", "Quick Bites", "No", "No"]).is_some());
}
