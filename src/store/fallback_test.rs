use super::*;

fn draft(title: &str) -> ProjectDraft {
    ProjectDraft {
        title: title.to_owned(),
        description: "A description".to_owned(),
        image_url: String::new(),
        visit_url: "https://example.com/x".to_owned(),
    }
}

// =============================================================================
// demo_projects
// =============================================================================

#[test]
fn demo_dataset_has_five_entries() {
    assert_eq!(demo_projects().len(), 5);
}

#[test]
fn demo_dataset_satisfies_record_invariants() {
    for project in demo_projects() {
        assert!(!project.id.is_empty());
        assert!(!project.title.trim().is_empty());
        assert!(!project.description.trim().is_empty());
        assert!(!project.visit_url.trim().is_empty());
    }
}

#[test]
fn demo_dataset_ids_are_unique() {
    let projects = demo_projects();
    for (i, a) in projects.iter().enumerate() {
        for b in &projects[i + 1..] {
            assert_ne!(a.id, b.id);
        }
    }
}

// =============================================================================
// LocalProjects
// =============================================================================

#[tokio::test]
async fn seeded_list_returns_demo_data() {
    let local = LocalProjects::seeded();
    assert_eq!(local.list().await, demo_projects());
    assert_eq!(local.count().await, 5);
}

#[tokio::test]
async fn create_inserts_at_front() {
    let local = LocalProjects::seeded();
    let created = local.create(draft("Newest")).await;
    let list = local.list().await;
    assert_eq!(list.len(), 6);
    assert_eq!(list[0].id, created.id);
    assert_eq!(list[0].title, "Newest");
}

#[tokio::test]
async fn get_finds_by_id() {
    let local = LocalProjects::seeded();
    let project = local.get("3").await.unwrap();
    assert_eq!(project.title, "Syntax Poetry");
}

#[tokio::test]
async fn get_unknown_id_is_none() {
    let local = LocalProjects::seeded();
    assert!(local.get("no-such-id").await.is_none());
}

#[tokio::test]
async fn update_patches_in_place() {
    let local = LocalProjects::seeded();
    let patch = ProjectPatch { title: Some("Renamed".to_owned()), ..ProjectPatch::default() };
    let updated = local.update("2", patch).await.unwrap();
    assert_eq!(updated.id, "2");
    assert_eq!(updated.title, "Renamed");
    assert_eq!(local.get("2").await.unwrap().title, "Renamed");
}

#[tokio::test]
async fn update_unknown_id_is_none() {
    let local = LocalProjects::seeded();
    let patch = ProjectPatch { title: Some("x".to_owned()), ..ProjectPatch::default() };
    assert!(local.update("no-such-id", patch).await.is_none());
}

#[tokio::test]
async fn delete_removes_exactly_one() {
    let local = LocalProjects::seeded();
    assert!(local.delete("4").await);
    assert_eq!(local.count().await, 4);
    assert!(local.get("4").await.is_none());
}

#[tokio::test]
async fn delete_unknown_id_reports_not_found() {
    let local = LocalProjects::seeded();
    assert!(!local.delete("no-such-id").await);
    assert_eq!(local.count().await, 5);
}

#[tokio::test]
async fn empty_store_behaves() {
    let local = LocalProjects::empty();
    assert_eq!(local.count().await, 0);
    assert!(!local.delete("1").await);
    let created = local.create(draft("Only")).await;
    assert_eq!(local.list().await, vec![created]);
}
