/// Checks the catalog filter against its definition over every combination
/// of a small record set, search terms and category selections.
///
/// A record is visible iff (title or body contains the search text,
/// ignoring case) and (the category is "All" or equals the record's).
use promptbank_core::defaults::ALL_CATEGORIES;
use promptbank_core::{derive_categories, CatalogFilter, Prompt};

fn record(id: &str, title: &str, category: &str, body: &str) -> Prompt {
    Prompt {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        body: body.to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

fn records() -> Vec<Prompt> {
    vec![
        record("1", "SEO Article Writer", "Writing", "You are an expert SEO copywriter."),
        record("2", "Python Bug Fixer", "Coding", "Analyze the following Python code"),
        record("3", "Résumé Polisher", "Career", "Tighten this RÉSUMÉ"),
        record("4", "Regex Helper", "Coding", ""),
        record("5", "", "Misc", "untitled body"),
    ]
}

fn expected(prompt: &Prompt, search: &str, category: &str) -> bool {
    let s = search.to_lowercase();
    (prompt.title.to_lowercase().contains(&s) || prompt.body.to_lowercase().contains(&s))
        && (category == ALL_CATEGORIES || prompt.category == category)
}

#[test]
fn test_filter_matches_definition_for_all_combinations() {
    let prompts = records();
    let searches = ["", "python", "PYTHON", "seo", "résumé", "code", "zzz", " ", "body"];
    let mut categories = derive_categories(&prompts);
    categories.push("Nonexistent".to_string());

    for search in searches {
        for category in &categories {
            let filter = CatalogFilter::new(search, category.clone());
            let visible: Vec<&str> = filter.apply(&prompts).iter().map(|p| p.id.as_str()).collect();
            let want: Vec<&str> = prompts
                .iter()
                .filter(|p| expected(p, search, category))
                .map(|p| p.id.as_str())
                .collect();
            assert_eq!(visible, want, "search={:?} category={:?}", search, category);
        }
    }
}

#[test]
fn test_categories_independent_of_order() {
    let mut prompts = records();
    let forward = derive_categories(&prompts);
    prompts.reverse();
    let backward = derive_categories(&prompts);

    assert_eq!(forward[0], ALL_CATEGORIES);
    assert_eq!(backward[0], ALL_CATEGORIES);

    let mut a = forward[1..].to_vec();
    let mut b = backward[1..].to_vec();
    a.sort();
    b.sort();
    assert_eq!(a, b);
    assert_eq!(a, vec!["Career", "Coding", "Misc", "Writing"]);
}

#[test]
fn test_no_match_yields_empty() {
    let prompts = records();
    assert!(CatalogFilter::new("zzz", ALL_CATEGORIES).apply(&prompts).is_empty());
}
