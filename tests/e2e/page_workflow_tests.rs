use std::sync::Arc;

use neet_pg_helper::{init_test_tracing, sample_catalog, ScriptedQuotaSource, ScriptedResponse};
use neet_pg_course_predictor::{
    CoursePredictorPage, FetchError, LoadOutcome, PageHandle, FETCH_FAILURE_NOTICE,
};
use neet_pg_page_model::{ClickTarget, FormField, NoticeOverlay, SubmitDecision, Theme};

const MEDICINE: &str = "MD GENERAL MEDICINE";
const SURGERY: &str = "MS GENERAL SURGERY";
const ORTHO: &str = "MS ORTHOPAEDICS";

fn mount(source: ScriptedQuotaSource) -> PageHandle<ScriptedQuotaSource> {
    init_test_tracing();
    CoursePredictorPage::mount(source, sample_catalog(), Arc::new(NoticeOverlay::new()))
        .expect("failed to mount page")
}

fn scripted() -> ScriptedQuotaSource {
    ScriptedQuotaSource::new()
        .with_quotas(MEDICINE, &["All India", "Deemed", "Central Institute"])
        .with_quotas(SURGERY, &["All India", "AFMS"])
        .with_failure(ORTHO, FetchError::Timeout)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_every_course_lists_exactly_its_quotas() {
    let page = mount(scripted());

    for (course, expected) in [
        (MEDICINE, vec!["All India", "Deemed", "Central Institute"]),
        (SURGERY, vec!["All India", "AFMS"]),
    ] {
        page.select_course(course).unwrap().await.unwrap();
        let control = page.quota_control();
        assert_eq!(control.options()[0].label, "-- choose quota --");
        assert_eq!(control.values(), expected);
    }
    assert_eq!(page.loader().source().calls(), vec![MEDICINE, SURGERY]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_placeholder_course_never_reaches_the_source() {
    let page = mount(scripted());

    for _ in 0..3 {
        assert_eq!(
            page.select_course("").unwrap().await.unwrap(),
            LoadOutcome::Cleared
        );
        assert!(page.quota_control().is_empty());
    }
    assert!(page.loader().source().calls().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_load_shows_one_notice() {
    let page = mount(scripted());
    page.select_course(MEDICINE).unwrap().await.unwrap();

    let outcome = page.select_course(ORTHO).unwrap().await.unwrap();
    assert_eq!(outcome, LoadOutcome::Failed(FetchError::Timeout));
    assert!(page.quota_control().is_empty());

    let notice = page.notice();
    assert_eq!(notice.shown_count(), 1);
    assert_eq!(notice.message(), FETCH_FAILURE_NOTICE);
    assert!(!page.click_notice(ClickTarget::Content));
    assert!(page.click_notice(ClickTarget::DismissButton));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_only_the_latest_selection_is_applied() {
    let source = scripted();
    let medicine_gate = source.gated(
        MEDICINE,
        ScriptedResponse::Quotas(vec!["All India".to_string()]),
    );
    let page = mount(source);

    let older = page.select_course(MEDICINE).unwrap();
    let newer = page.select_course(SURGERY).unwrap();
    assert_eq!(newer.await.unwrap(), LoadOutcome::Populated { count: 2 });

    medicine_gate.release();
    assert_eq!(older.await.unwrap(), LoadOutcome::Superseded { sequence: 1 });
    assert_eq!(page.quota_options(), vec!["All India", "AFMS"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stale_failure_is_not_surfaced() {
    let source = scripted();
    let gate = source.gated(
        ORTHO,
        ScriptedResponse::Fail(FetchError::Network("reset".to_string())),
    );
    let page = mount(source);

    let failing = page.select_course(ORTHO).unwrap();
    page.select_course(MEDICINE).unwrap().await.unwrap();
    gate.release();

    assert_eq!(failing.await.unwrap(), LoadOutcome::Superseded { sequence: 1 });
    assert_eq!(page.notice().shown_count(), 0);
    assert_eq!(page.quota_options().len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_repeated_selection_yields_identical_options() {
    let page = mount(scripted());

    page.select_course(SURGERY).unwrap().await.unwrap();
    let first = page.quota_control();
    page.select_course(SURGERY).unwrap().await.unwrap();
    assert_eq!(page.quota_control(), first);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_changing_course_clears_the_chosen_quota() {
    let page = mount(scripted());

    page.select_course(MEDICINE).unwrap().await.unwrap();
    page.select_quota("Deemed").unwrap();
    assert_eq!(page.form().quota, "Deemed");

    page.select_course(SURGERY).unwrap().await.unwrap();
    assert_eq!(page.form().quota, "");

    match page.submit().unwrap() {
        SubmitDecision::Cancelled(err) => assert_eq!(
            err.missing,
            vec![FormField::Quota, FormField::Category, FormField::Rank]
        ),
        other => panic!("expected cancellation, got {:?}", other),
    }
    assert_eq!(
        page.notice().message(),
        "Please fill: quota, category, valid rank"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_valid_form_proceeds_unmodified() {
    let page = mount(scripted());

    page.select_course(SURGERY).unwrap().await.unwrap();
    page.select_quota("AFMS").unwrap();
    page.select_category("OBC PwD").unwrap();
    assert_eq!(page.input_rank("2000000").unwrap(), "999999");
    page.input_rank("10234").unwrap();

    let decision = page.submit().unwrap();
    let SubmitDecision::Proceed(submission) = decision else {
        panic!("expected submission to proceed");
    };
    assert_eq!(submission.course, SURGERY);
    assert_eq!(submission.quota, "AFMS");
    assert_eq!(submission.category, "OBC PwD");
    assert_eq!(submission.rank, 10234);
    assert_eq!(page.notice().shown_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_negative_rank_is_clamped_to_zero_and_rejected() {
    let page = mount(scripted());

    page.select_course(MEDICINE).unwrap().await.unwrap();
    page.select_quota("All India").unwrap();
    page.select_category("SC").unwrap();
    assert_eq!(page.input_rank("-3").unwrap(), "0");

    match page.submit().unwrap() {
        SubmitDecision::Cancelled(err) => assert_eq!(err.missing, vec![FormField::Rank]),
        other => panic!("expected cancellation, got {:?}", other),
    }
    let notice = page.notice();
    assert_eq!(notice.shown_count(), 1);
    assert_eq!(notice.message(), "Please fill: valid rank");
    assert_eq!(page.form().rank, "0");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_results_table_zooms_while_hovered() {
    let page = mount(scripted());
    assert!(!page.results_hovered());

    let style = page.hover_results(true);
    assert!(page.results_hovered());
    assert_eq!(style.transform, "scale(1.01)");
    assert_eq!(style.transition, Some("transform 0.15s ease-in-out"));

    let style = page.hover_results(false);
    assert!(!page.results_hovered());
    assert_eq!(style.transform, "scale(1)");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stylesheet_exposes_the_palette() {
    let page = mount(scripted());
    let css = page.stylesheet();

    assert_eq!(css, Theme::default().to_css_variables());
    assert!(css.starts_with(":root {"));
    assert!(css.contains("  --dark-900: #0f172a;"));
    assert!(css.contains("  --primary-500: #0ea5e9;"));
    assert!(css.contains("  --font-sans: \"Poppins\", sans-serif;"));
}
