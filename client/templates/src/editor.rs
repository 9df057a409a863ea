//! The template configuration editor.
//!
//! Edits happen on a working copy; the original stays untouched. Committing
//! deep-compares every editable field and, on any difference, stores a
//! derived template under `<original>_modified_<timestamp>` and makes it the
//! active template for the run.

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use simdash_core::traits::TemplateStore;
use simdash_core::types::{Template, TemplateData};

/// Result of a "check for changes" commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// Nothing differed; the original template id stays active.
    Unchanged,
    /// A derived template was created and is now active.
    Modified { template_id: String },
}

#[derive(Debug, Clone)]
pub struct TemplateEditor {
    original: Template,
    /// The editable working copy of the template body.
    pub working: TemplateData,
    derived_id: Option<String>,
}

impl TemplateEditor {
    pub fn load(template: Template) -> Self {
        Self {
            working: template.template_data.clone(),
            original: template,
            derived_id: None,
        }
    }

    pub fn original(&self) -> &Template {
        &self.original
    }

    /// The template id a run should use: the derived copy when one was
    /// committed, otherwise the original.
    pub fn active_template_id(&self) -> &str {
        self.derived_id.as_deref().unwrap_or(&self.original.template_id)
    }

    /// Deep-compare the working copy against the original. Any difference in
    /// rounds, conversations-per-round, description, or any faction's prompt,
    /// person-prompt list, or agent count yields the derived template to
    /// submit; identical content yields `None`.
    pub fn detect_changes(&self) -> Option<Template> {
        if self.working == self.original.template_data {
            return None;
        }

        let template_id = format!(
            "{}_modified_{}",
            self.original.template_id,
            Utc::now().timestamp_millis()
        );
        let mut template_data = self.working.clone();
        template_data.template_name = format!("{}_modified", self.original.template_data.template_name);

        Some(Template {
            template_id,
            description: template_data.description.clone(),
            template_data,
        })
    }

    /// Check for changes and, if any, store the derived template exactly once
    /// and record it as active.
    pub async fn commit(&mut self, store: &dyn TemplateStore) -> Result<ChangeOutcome> {
        match self.detect_changes() {
            None => {
                self.derived_id = None;
                Ok(ChangeOutcome::Unchanged)
            }
            Some(derived) => {
                store.create_template(&derived).await?;
                info!(template_id = %derived.template_id, "Derived template stored");
                self.derived_id = Some(derived.template_id.clone());
                Ok(ChangeOutcome::Modified { template_id: derived.template_id })
            }
        }
    }

    /// Discard edits and reload the original definition, clearing any derived
    /// template reference.
    pub fn reset(&mut self) {
        self.working = self.original.template_data.clone();
        self.derived_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::password_extraction;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Recording store: remembers every template it was asked to create.
    #[derive(Default)]
    struct RecordingStore {
        created: Mutex<Vec<Template>>,
    }

    #[async_trait]
    impl TemplateStore for RecordingStore {
        async fn create_template(&self, template: &Template) -> Result<()> {
            self.created.lock().unwrap().push(template.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unmodified_form_keeps_original_id() {
        let store = RecordingStore::default();
        let mut editor = TemplateEditor::load(password_extraction());

        let outcome = editor.commit(&store).await.unwrap();

        assert_eq!(outcome, ChangeOutcome::Unchanged);
        assert_eq!(editor.active_template_id(), "social_engineering");
        assert!(store.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_field_edit_creates_derived_template_once() {
        let store = RecordingStore::default();
        let mut editor = TemplateEditor::load(password_extraction());
        editor.working.rounds = 6;

        let outcome = editor.commit(&store).await.unwrap();

        let created = store.created.lock().unwrap();
        assert_eq!(created.len(), 1);

        let derived_id = match outcome {
            ChangeOutcome::Modified { template_id } => template_id,
            other => panic!("expected modification, got {:?}", other),
        };
        assert_eq!(editor.active_template_id(), derived_id);

        // `<original>_modified_<number>`
        let suffix = derived_id
            .strip_prefix("social_engineering_modified_")
            .expect("derived id keeps the original prefix");
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(
            created[0].template_data.template_name,
            "password_extraction_social_engineering_modified"
        );
    }

    #[tokio::test]
    async fn test_faction_edit_is_detected() {
        let store = RecordingStore::default();
        let mut editor = TemplateEditor::load(password_extraction());
        editor
            .working
            .factions
            .get_mut("social_engineers")
            .unwrap()
            .agent_count = 3;

        let outcome = editor.commit(&store).await.unwrap();
        assert!(matches!(outcome, ChangeOutcome::Modified { .. }));
    }

    #[tokio::test]
    async fn test_person_prompt_list_compare_is_deep() {
        let store = RecordingStore::default();
        let mut editor = TemplateEditor::load(password_extraction());
        editor
            .working
            .factions
            .get_mut("innocent_users")
            .unwrap()
            .person_prompt
            .pop();

        let outcome = editor.commit(&store).await.unwrap();
        assert!(matches!(outcome, ChangeOutcome::Modified { .. }));
    }

    #[tokio::test]
    async fn test_reset_discards_edits_and_derived_reference() {
        let store = RecordingStore::default();
        let mut editor = TemplateEditor::load(password_extraction());
        editor.working.rounds = 9;
        editor.commit(&store).await.unwrap();
        assert_ne!(editor.active_template_id(), "social_engineering");

        editor.reset();

        assert_eq!(editor.working, editor.original().template_data);
        assert_eq!(editor.active_template_id(), "social_engineering");
    }

    #[test]
    fn test_original_is_never_mutated() {
        let mut editor = TemplateEditor::load(password_extraction());
        editor.working.description = "rewritten".into();
        editor.working.rounds = 1;
        assert_eq!(editor.original().template_data.rounds, 5);
        assert!(editor.detect_changes().is_some());
    }
}
