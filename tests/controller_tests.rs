mod common;

use std::time::Duration;

use common::{controller, LookupEvent, MockLLM, MockVideoSearch, REMEDY_TEXT};
use mediai_assistant::{NoticeLevel, Page, PageAction, PromptTemplate, SessionState};

#[tokio::test]
async fn test_remedies_trigger_one_lookup_per_extracted_name() {
    let llm = MockLLM::replying(REMEDY_TEXT);
    let videos = MockVideoSearch::new();
    let controller = controller(llm.clone(), videos.clone());

    let state = SessionState::new().navigate(Page::Remedies);
    let (next, view) = controller
        .handle(state, PageAction::Submit("headache and poor sleep".to_string()))
        .await;

    assert_eq!(next, state);
    assert_eq!(llm.call_count(), 1);
    assert_eq!(
        videos.queries(),
        vec![
            "how to prepare Ginger Tea natural remedy home remedies tutorial",
            "how to prepare Peppermint Oil natural remedy home remedies tutorial",
            "how to prepare Chamomile Infusion natural remedy home remedies tutorial",
        ]
    );

    let subjects: Vec<_> = view.video_sections.iter().map(|s| s.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Ginger Tea", "Peppermint Oil", "Chamomile Infusion"]);
    assert!(view.video_sections.iter().all(|s| s.videos.len() == 3));

    let content = view.content.expect("remedy content");
    assert_eq!(content.template, PromptTemplate::SymptomRemedies);
    assert_eq!(content.text.as_str(), REMEDY_TEXT);
    assert!(view.notices.is_empty());
}

#[tokio::test]
async fn test_failed_lookup_does_not_stop_later_lookups() {
    let videos = MockVideoSearch::failing_on(&[1]);
    let controller = controller(MockLLM::replying(REMEDY_TEXT), videos.clone());

    let state = SessionState::new().navigate(Page::Remedies);
    let (_, view) = controller
        .handle(state, PageAction::Submit("headache".to_string()))
        .await;

    assert_eq!(videos.queries().len(), 3);
    assert_eq!(view.video_sections.len(), 3);
    assert!(view.video_sections[0].videos.is_empty());
    assert_eq!(view.video_sections[1].videos.len(), 3);
    assert_eq!(view.video_sections[2].videos.len(), 3);
    // sections stay tied to their own subject
    assert_eq!(view.video_sections[1].videos[0].video_id, "vid2-1");

    assert_eq!(view.notices.len(), 1);
    assert_eq!(view.notices[0].level, NoticeLevel::Error);
    assert!(view.notices[0].message.starts_with("Error fetching videos"));
    assert!(view.content.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_remedy_lookups_never_overlap() {
    let videos = MockVideoSearch::slow(Duration::from_millis(30), &[1]);
    let controller = controller(MockLLM::replying(REMEDY_TEXT), videos.clone());

    let state = SessionState::new().navigate(Page::Remedies);
    let (_, view) = controller
        .handle(state, PageAction::Submit("headache".to_string()))
        .await;

    assert_eq!(
        videos.events(),
        vec![
            LookupEvent::Start(1),
            LookupEvent::End(1),
            LookupEvent::Start(2),
            LookupEvent::End(2),
            LookupEvent::Start(3),
            LookupEvent::End(3),
        ]
    );
    let subjects: Vec<_> = view.video_sections.iter().map(|s| s.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Ginger Tea", "Peppermint Oil", "Chamomile Infusion"]);
}

#[tokio::test]
async fn test_duplicate_remedies_are_looked_up_twice() {
    let text = "1. Ginger\n2. Honey\n3. Ginger";
    let videos = MockVideoSearch::new();
    let controller = controller(MockLLM::replying(text), videos.clone());

    let state = SessionState::new().navigate(Page::Remedies);
    let (_, view) = controller.handle(state, PageAction::Submit("cough".into())).await;

    assert_eq!(videos.queries().len(), 3);
    assert_eq!(view.video_sections[0].subject, view.video_sections[2].subject);
}

#[tokio::test]
async fn test_remedies_without_numbered_list_skip_lookups() {
    let videos = MockVideoSearch::new();
    let controller = controller(MockLLM::replying("Rest and drink water."), videos.clone());

    let state = SessionState::new().navigate(Page::Remedies);
    let (_, view) = controller.handle(state, PageAction::Submit("tired".into())).await;

    assert!(videos.queries().is_empty());
    assert!(view.video_sections.is_empty());
    assert!(view.content.is_some());
    assert!(view.notices.is_empty());
}

#[tokio::test]
async fn test_generation_failure_stops_the_action() {
    let llm = MockLLM::failing("model overloaded");
    let videos = MockVideoSearch::new();
    let controller = controller(llm.clone(), videos.clone());

    let state = SessionState::new().navigate(Page::Remedies);
    let (_, view) = controller.handle(state, PageAction::Submit("fever".into())).await;

    assert_eq!(llm.call_count(), 1);
    assert!(videos.queries().is_empty());
    assert!(view.content.is_none());
    assert!(view.video_sections.is_empty());
    assert_eq!(view.notices.len(), 1);
    assert!(view.notices[0].message.contains("Error generating content"));
}

#[tokio::test]
async fn test_emergency_looks_up_the_description_once() {
    let videos = MockVideoSearch::new();
    let controller = controller(
        MockLLM::replying("**Immediate Steps to Take:**\n1. Cool the burn\n2. Cover it"),
        videos.clone(),
    );

    let state = SessionState::new().navigate(Page::Emergency);
    let (_, view) = controller.handle(state, PageAction::Submit("severe burn".into())).await;

    assert_eq!(
        videos.queries(),
        vec!["first aid severe burn emergency treatment tutorial medical"]
    );
    assert_eq!(view.video_sections.len(), 1);
    assert_eq!(view.video_sections[0].subject, "severe burn");
    assert!(view.banner.is_some());
    assert_eq!(
        view.content.map(|c| c.template),
        Some(PromptTemplate::EmergencyFirstAid)
    );
}

#[tokio::test]
async fn test_emergency_lookup_failure_keeps_content() {
    let videos = MockVideoSearch::failing_on(&[1]);
    let controller = controller(MockLLM::replying("1. Call for help"), videos.clone());

    let state = SessionState::new().navigate(Page::Emergency);
    let (_, view) = controller.handle(state, PageAction::Submit("choking".into())).await;

    assert!(view.content.is_some());
    assert_eq!(view.video_sections.len(), 1);
    assert!(view.video_sections[0].videos.is_empty());
    assert_eq!(view.notices.len(), 1);
}

#[tokio::test]
async fn test_medicine_never_searches_videos() {
    let llm = MockLLM::replying("**Generic Name:**\nParacetamol\n1. Fever");
    let videos = MockVideoSearch::new();
    let controller = controller(llm.clone(), videos.clone());

    let state = SessionState::new().navigate(Page::Medicine);
    let (_, view) = controller.handle(state, PageAction::Submit("Tylenol".into())).await;

    assert!(videos.queries().is_empty());
    assert_eq!(
        view.content.map(|c| c.template),
        Some(PromptTemplate::MedicineAnalysis)
    );

    let prompts = llm.prompts.lock().unwrap();
    assert!(prompts[0][0].content.contains("'Tylenol'"));
}

#[tokio::test]
async fn test_blank_query_and_home_make_no_calls() {
    let llm = MockLLM::replying(REMEDY_TEXT);
    let videos = MockVideoSearch::new();
    let controller = controller(llm.clone(), videos.clone());

    let state = SessionState::new().navigate(Page::Remedies);
    let (_, view) = controller.handle(state, PageAction::Submit("   ".into())).await;
    assert_eq!(view.notices[0].level, NoticeLevel::Warning);

    let (_, view) = controller
        .handle(SessionState::new(), PageAction::Submit("headache".into()))
        .await;
    assert!(view.content.is_none());
    assert_eq!(view.notices.len(), 1);
    assert_eq!(view.notices[0].level, NoticeLevel::Warning);

    assert_eq!(llm.call_count(), 0);
    assert!(videos.queries().is_empty());
}

#[tokio::test]
async fn test_navigation_and_toggle_actions() {
    let controller = controller(MockLLM::replying("unused"), MockVideoSearch::new());

    let state = SessionState::new();
    let (state, view) = controller.handle(state, PageAction::ToggleFirstAid).await;
    assert_eq!(state.current_page, Page::Home);
    assert!(state.first_aid_panel_visible);
    assert_eq!(view.first_aid_kit.len(), 15);

    let (state, view) = controller
        .handle(state, PageAction::Navigate(Page::Emergency))
        .await;
    assert_eq!(state.current_page, Page::Emergency);
    assert!(state.first_aid_panel_visible);
    assert!(view.content.is_none());

    let (state, view) = controller.handle(state, PageAction::ToggleFirstAid).await;
    assert_eq!(state.current_page, Page::Emergency);
    assert!(!state.first_aid_panel_visible);
    assert!(view.first_aid_kit.is_empty());
}
