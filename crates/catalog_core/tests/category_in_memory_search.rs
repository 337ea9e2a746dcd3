use catalog_core::{
    Category, CategoryInMemoryRepository, CategoryProps, CategorySearchParams, Repository,
    SearchableRepository, SortDirection,
};
use chrono::{Duration, TimeZone, Utc};

fn category_at(name: &str, offset_secs: i64) -> Category {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Category::new(CategoryProps {
        name: name.to_string(),
        created_at: Some(base + Duration::seconds(offset_secs)),
        ..CategoryProps::default()
    })
}

fn names(items: &[Category]) -> Vec<&str> {
    items.iter().map(Category::name).collect()
}

async fn seeded(names: &[&str]) -> CategoryInMemoryRepository {
    let mut repo = CategoryInMemoryRepository::new();
    let categories: Vec<Category> = names
        .iter()
        .enumerate()
        .map(|(index, name)| category_at(name, index as i64))
        .collect();
    repo.bulk_insert(&categories).await.unwrap();
    repo
}

#[tokio::test]
async fn paginates_sorted_names_end_to_end() {
    let repo = seeded(&["c", "a", "e", "b", "d"]).await;
    let base = CategorySearchParams::new()
        .with_per_page(2)
        .with_sort("name")
        .with_sort_dir(SortDirection::Asc);

    let page1 = repo.search(&base.clone().with_page(1)).await.unwrap();
    assert_eq!(names(page1.items()), ["a", "b"]);
    assert_eq!(page1.total(), 5);
    assert_eq!(page1.last_page(), 3);

    let page2 = repo.search(&base.clone().with_page(2)).await.unwrap();
    assert_eq!(names(page2.items()), ["c", "d"]);

    let page3 = repo.search(&base.clone().with_page(3)).await.unwrap();
    assert_eq!(names(page3.items()), ["e"]);

    let page4 = repo.search(&base.with_page(4)).await.unwrap();
    assert!(page4.items().is_empty());
    assert_eq!(page4.total(), 5);
    assert_eq!(page4.current_page(), 4);
}

#[tokio::test]
async fn default_order_is_newest_first() {
    let repo = seeded(&["first", "second", "third"]).await;

    let result = repo.search(&CategorySearchParams::new()).await.unwrap();
    assert_eq!(names(result.items()), ["third", "second", "first"]);
    assert_eq!(result.per_page(), 15);
    assert_eq!(result.last_page(), 1);
}

#[tokio::test]
async fn unknown_sort_field_falls_back_to_default_order() {
    let repo = seeded(&["first", "second"]).await;
    let params = CategorySearchParams::new()
        .with_sort("is_active")
        .with_sort_dir(SortDirection::Asc);

    let result = repo.search(&params).await.unwrap();
    assert_eq!(names(result.items()), ["second", "first"]);
}

#[tokio::test]
async fn name_sort_is_case_sensitive_and_direction_aware() {
    let repo = seeded(&["b", "a", "d", "e", "C"]).await;

    let asc = repo
        .search(&CategorySearchParams::new().with_sort("name"))
        .await
        .unwrap();
    assert_eq!(names(asc.items()), ["C", "a", "b", "d", "e"]);

    let desc = repo
        .search(
            &CategorySearchParams::new()
                .with_sort("name")
                .with_sort_dir(SortDirection::Desc),
        )
        .await
        .unwrap();
    assert_eq!(names(desc.items()), ["e", "d", "b", "a", "C"]);
}

#[tokio::test]
async fn ties_keep_insertion_order_in_both_directions() {
    let mut repo = CategoryInMemoryRepository::new();
    let same_time = category_at("same", 0);
    let first = Category::new(CategoryProps {
        name: "dup".to_string(),
        created_at: Some(same_time.created_at()),
        ..CategoryProps::default()
    });
    let second = Category::new(CategoryProps {
        name: "dup".to_string(),
        created_at: Some(same_time.created_at()),
        ..CategoryProps::default()
    });
    repo.bulk_insert(&[first.clone(), second.clone()]).await.unwrap();

    for direction in [SortDirection::Asc, SortDirection::Desc] {
        let result = repo
            .search(
                &CategorySearchParams::new()
                    .with_sort("name")
                    .with_sort_dir(direction),
            )
            .await
            .unwrap();
        let ids: Vec<_> = result.items().iter().map(Category::category_id).collect();
        assert_eq!(ids, [first.category_id(), second.category_id()]);
    }
}

#[tokio::test]
async fn filter_is_case_insensitive_and_keeps_order() {
    let repo = seeded(&["test", "a", "TEST", "TeSt", "other"]).await;
    let params = CategorySearchParams::new()
        .with_filter(Some("TEST".to_string()))
        .with_sort("created_at")
        .with_sort_dir(SortDirection::Asc)
        .with_per_page(2);

    let page1 = repo.search(&params.clone().with_page(1)).await.unwrap();
    assert_eq!(names(page1.items()), ["test", "TEST"]);
    assert_eq!(page1.total(), 3);
    assert_eq!(page1.last_page(), 2);

    let page2 = repo.search(&params.with_page(2)).await.unwrap();
    assert_eq!(names(page2.items()), ["TeSt"]);
}

#[tokio::test]
async fn blank_filter_is_ignored() {
    let repo = seeded(&["a", "b"]).await;
    let params = CategorySearchParams::new().with_filter(Some("   ".to_string()));
    assert_eq!(params.filter(), None);

    let result = repo.search(&params).await.unwrap();
    assert_eq!(result.total(), 2);
}

#[tokio::test]
async fn sorting_twice_gives_the_same_page() {
    let repo = seeded(&["m", "b", "x", "a", "k", "b"]).await;
    let params = CategorySearchParams::new()
        .with_sort("name")
        .with_sort_dir(SortDirection::Desc)
        .with_per_page(4);

    let first = repo.search(&params).await.unwrap();
    let second = repo.search(&params).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(names(first.items()), ["x", "m", "k", "b"]);
}

#[tokio::test]
async fn items_per_page_follow_length_formula() {
    let repo = seeded(&["a", "b", "c", "d", "e", "f", "g"]).await;

    for per_page in 1..=8_i64 {
        for page in 1..=9_i64 {
            let result = repo
                .search(
                    &CategorySearchParams::new()
                        .with_page(page)
                        .with_per_page(per_page),
                )
                .await
                .unwrap();
            let start = (page - 1) * per_page;
            let expected = (7 - start).clamp(0, per_page) as usize;
            assert_eq!(result.items().len(), expected, "page={page} per_page={per_page}");
            assert_eq!(result.total(), 7);
        }
    }
}

#[tokio::test]
async fn sortable_fields_are_name_and_created_at() {
    let repo = CategoryInMemoryRepository::new();
    assert_eq!(repo.sortable_fields(), ["name", "created_at"]);
}
