mod common;

use common::*;
use users_main_service::error::Error;
use users_main_service::models::pagination::PageArgs;
use users_main_service::services::recruiter_service::RecruiterService;
use users_main_service::services::RecruiterAccess;

#[tokio::test]
async fn recruiter_profile_includes_company_and_positions() {
    let Some(store) = store().await else { return };
    let service = RecruiterService::new(store.clone());
    let company = seed_company(store.pool(), "Hiring Co").await;
    let recruiter = seed_recruiter(store.pool(), &company).await;
    let (_, backend) = seed_position(store.pool(), &recruiter, "Backend").await;
    let (_, frontend) = seed_position(store.pool(), &recruiter, "Frontend").await;

    assert!(service.exists(&recruiter).await.unwrap());
    let profile = service.get_by_public_id(&recruiter).await.unwrap();

    assert_eq!(profile.first_name.as_deref(), Some("Rita"));
    assert_eq!(profile.company.public_id, company);
    assert_eq!(profile.company.name, "Hiring Co");
    let positions: Vec<&str> = profile.positions.iter().map(|p| p.public_id.as_str()).collect();
    assert_eq!(positions, vec![backend.as_str(), frontend.as_str()]);
}

#[tokio::test]
async fn missing_recruiter_is_not_found() {
    let Some(store) = store().await else { return };
    let service = RecruiterService::new(store);
    let ghost = unique("ghost");

    assert!(!service.exists(&ghost).await.unwrap());
    assert!(matches!(
        service.get_by_public_id(&ghost).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn interviews_follow_owned_positions() {
    let Some(store) = store().await else { return };
    let service = RecruiterService::new(store.clone());
    let company = seed_company(store.pool(), "Panel Partners").await;
    let recruiter = seed_recruiter(store.pool(), &company).await;
    let other = seed_recruiter(store.pool(), &company).await;
    let (mine, _) = seed_position(store.pool(), &recruiter, "Data").await;
    let (theirs, _) = seed_position(store.pool(), &other, "Ops").await;
    let candidate = seed_candidate(store.pool(), "Quinn", "Candidate").await;

    for _ in 0..3 {
        seed_interview(
            store.pool(),
            &candidate,
            mine,
            Some(RESULT_PAYLOAD.as_bytes()),
        )
        .await;
    }
    seed_interview(store.pool(), &candidate, theirs, None).await;

    let page = service
        .interviews(&recruiter, PageArgs::new(2, 2))
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].result.as_ref().map(|r| r.score), Some(8));
}
