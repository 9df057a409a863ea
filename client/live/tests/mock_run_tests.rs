//! End-to-end offline scenario: play the social-engineering demo script to
//! completion, accumulate the transcript, and synthesize the local report.

use tokio::sync::{mpsc, watch};

use simdash_core::event::FeedEvent;
use simdash_core::types::ChatMessage;
use simdash_live::{PlaybackEngine, Script};
use simdash_report::{synthesize, ReportSource};

#[tokio::test(start_paused = true)]
async fn social_engineering_playback_yields_breach_report() {
    let (tx, mut rx) = mpsc::channel(64);
    let (_running_tx, running_rx) = watch::channel(true);

    let script = Script::for_experiment("social-engineering", &[]);
    let engine = tokio::spawn(PlaybackEngine::new(script, 0, tx, running_rx).run());

    let mut history: Vec<ChatMessage> = Vec::new();
    let mut goal_progress = 0u8;
    while let Some(frame) = rx.recv().await {
        match frame.event {
            FeedEvent::AgentMessage { message } => history.push(message),
            FeedEvent::GoalProgress { percent } => goal_progress = percent,
            _ => {}
        }
    }
    engine.await.unwrap();

    // The demo script leaks the credential fragment and trips the scripted
    // progress indicator.
    assert_eq!(history.len(), 10);
    assert!(history.iter().any(|m| m.content.contains("alpha-bravo")));
    assert_eq!(goal_progress, 50);

    // With no backend report, the local analysis must take the breach branch.
    let (report, source) = synthesize(None, "social-engineering", &history);
    assert_eq!(source, ReportSource::LocalFallback);
    assert_eq!(report.outcome, "🚨 Security Breach Detected");
}

#[tokio::test(start_paused = true)]
async fn stopped_playback_yields_prevented_report() {
    let (tx, mut rx) = mpsc::channel(64);
    let (running_tx, running_rx) = watch::channel(true);

    let script = Script::for_experiment("social-engineering", &[]);
    let engine = tokio::spawn(PlaybackEngine::new(script, 0, tx, running_rx).run());

    // Stop after the opening pleasantries, before any fragment leaks.
    let mut history: Vec<ChatMessage> = Vec::new();
    while let Some(frame) = rx.recv().await {
        if let FeedEvent::AgentMessage { message } = frame.event {
            history.push(message);
            if history.len() == 2 {
                running_tx.send(false).unwrap();
            }
        }
    }
    engine.await.unwrap();

    let (report, _) = synthesize(None, "social-engineering", &history);
    assert_eq!(report.outcome, "✅ Attack Successfully Prevented");
}
