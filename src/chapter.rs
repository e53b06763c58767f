use crate::config::DEFAULT_CHAPTER_TITLE;
use crate::example::ExampleDraft;
use crate::vocab::{VocabItem, Vocabulary};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChapterSettings {
    pub title: String,
    /// Tags as typed, comma separated.
    pub tags: String,
}

impl Default for ChapterSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_CHAPTER_TITLE.to_string(),
            tags: String::new(),
        }
    }
}

impl ChapterSettings {
    pub fn tag_list(&self) -> Vec<String> {
        parse_tags(&self.tags)
    }
}

/// Splits a comma separated tag field, trimming and dropping blank entries.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct LessonDraft {
    pub video_url: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ApplicationDraft {
    pub video_urls: [String; 2],
    pub problems: String,
}

/// Everything the author has entered, bundled for copying out of the page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChapterExport {
    pub title: String,
    pub tags: Vec<String>,
    pub vocabulary: Vec<VocabItem>,
    pub lesson: LessonDraft,
    pub example: ExampleDraft,
    pub application: ApplicationDraft,
}

impl ChapterExport {
    /// Snapshots the chapter. Audio handles are dropped since they only live in this page.
    pub fn new(
        settings: &ChapterSettings,
        vocabulary: &Vocabulary,
        lesson: &LessonDraft,
        example: &ExampleDraft,
        application: &ApplicationDraft,
    ) -> Self {
        let mut vocabulary = vocabulary.clone();
        vocabulary.clear_audio();

        Self {
            title: settings.title.clone(),
            tags: settings.tag_list(),
            vocabulary: vocabulary.items().to_vec(),
            lesson: lesson.clone(),
            example: example.clone(),
            application: application.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
