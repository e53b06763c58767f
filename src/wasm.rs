#![cfg(target_arch = "wasm32")]

use crate::{
    ApplicationDraft, ChapterConfig, ChapterExport, ChapterSettings, ChatTranscript, ExampleDraft,
    ExampleKind, Flashcard, LessonDraft, QuestionKind, ReplyTimers, Responses, Speaker, StoreError,
    VocabError, VocabItem, VocabMode, VocabStore, Vocabulary, count_blanks, fill_blank_preview,
    filter_vocabulary, load_vocabulary, playable_audio, practice_preview, sample_questions,
    save_vocabulary, scramble_sentence, shuffle_pairs, to_embed_url,
};
use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::callback::Timeout;
use leptos::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, HtmlAudioElement, HtmlInputElement, KeyboardEvent, Url};

/// Vocabulary slot in the browser's local storage.
#[derive(Debug, Clone)]
struct BrowserStore {
    key: String,
}

impl BrowserStore {
    fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

fn store_error(error: StorageError) -> StoreError {
    match error {
        StorageError::SerdeError(source) => StoreError::Malformed(source),
        other => StoreError::Backend(other.to_string()),
    }
}

impl VocabStore for BrowserStore {
    fn read(&self) -> Result<Option<Vec<VocabItem>>, StoreError> {
        match LocalStorage::get::<Vec<VocabItem>>(&self.key) {
            Ok(items) => Ok(Some(items)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(error) => Err(store_error(error)),
        }
    }

    fn write(&self, items: &[VocabItem]) -> Result<(), StoreError> {
        LocalStorage::set(&self.key, items).map_err(store_error)
    }

    fn clear(&self) -> Result<(), StoreError> {
        LocalStorage::delete(&self.key);
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum NoticeKind {
    Info,
    Warning,
}

/// Inline feedback shown in place of blocking browser dialogs.
#[derive(Clone, PartialEq, Eq)]
struct Notice {
    message: String,
    kind: NoticeKind,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Info,
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Warning,
        }
    }
}

fn tab_class(active: bool) -> &'static str {
    if active { "tab active" } else { "tab" }
}

fn ignore_unknown<T>(result: Result<T, VocabError>) {
    if let Err(error) = result {
        log::debug!("ignoring vocabulary edit: {error}");
    }
}

fn revoke_object_url(reference: &str) {
    if reference.starts_with("blob:") {
        if let Err(error) = Url::revoke_object_url(reference) {
            log::debug!("could not revoke {reference}: {error:?}");
        }
    }
}

fn object_url_from(event: &Event) -> Option<String> {
    let input: HtmlInputElement = event_target(event);
    let file = input.files()?.get(0)?;

    match Url::create_object_url_with_blob(&file) {
        Ok(reference) => Some(reference),
        Err(error) => {
            log::warn!("could not read uploaded audio: {error:?}");
            None
        }
    }
}

fn play_audio(reference: &str, set_notice: WriteSignal<Option<Notice>>) {
    let source = match playable_audio(reference) {
        Ok(source) => source,
        Err(error) => {
            set_notice.set(Some(Notice::warning(error.to_string())));
            return;
        }
    };

    let audio = match HtmlAudioElement::new_with_src(source) {
        Ok(audio) => audio,
        Err(error) => {
            log::warn!("could not create audio element: {error:?}");
            return;
        }
    };

    match audio.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(error) = JsFuture::from(promise).await {
                log::warn!("audio playback failed: {error:?}");
            }
        }),
        Err(error) => log::warn!("audio playback failed: {error:?}"),
    }
}

#[component]
fn NoticeBanner(
    notice: ReadSignal<Option<Notice>>,
    set_notice: WriteSignal<Option<Notice>>,
) -> impl IntoView {
    move || {
        notice.get().map(|current| {
            let class = match current.kind {
                NoticeKind::Info => "notice notice-info",
                NoticeKind::Warning => "notice notice-warning",
            };

            view! {
                <div class=class role="status">
                    <span>{current.message}</span>
                    <button class="ghost" on:click=move |_| set_notice.set(None)>
                        "Dismiss"
                    </button>
                </div>
            }
        })
    }
}

#[component]
fn VideoFrame(url: String, title: &'static str) -> impl IntoView {
    view! {
        <div class="video-frame">
            <iframe title=title src=to_embed_url(&url) frameborder="0" allowfullscreen=true></iframe>
        </div>
    }
}

#[component]
fn VocabRow(
    id: String,
    vocab: ReadSignal<Vocabulary>,
    set_vocab: WriteSignal<Vocabulary>,
    set_notice: WriteSignal<Option<Notice>>,
) -> impl IntoView {
    let word_id = id.clone();
    let word = move || {
        vocab.with(|current| {
            current
                .get(&word_id)
                .map(|item| item.word.clone())
                .unwrap_or_default()
        })
    };

    let meaning_id = id.clone();
    let meaning = move || {
        vocab.with(|current| {
            current
                .get(&meaning_id)
                .map(|item| item.meaning.clone())
                .unwrap_or_default()
        })
    };

    let edit_word_id = id.clone();
    let on_word = move |ev| {
        let value = event_target_value(&ev);
        set_vocab.update(|current| ignore_unknown(current.set_word(&edit_word_id, value)));
    };

    let edit_meaning_id = id.clone();
    let on_meaning = move |ev| {
        let value = event_target_value(&ev);
        set_vocab.update(|current| ignore_unknown(current.set_meaning(&edit_meaning_id, value)));
    };

    let upload_id = id.clone();
    let on_upload = move |ev: Event| {
        let Some(reference) = object_url_from(&ev) else {
            return;
        };
        set_vocab.update(|current| match current.attach_audio(&upload_id, reference) {
            Ok(Some(previous)) => revoke_object_url(&previous),
            Ok(None) => {}
            Err(error) => log::debug!("ignoring audio upload: {error}"),
        });
    };

    let play_id = id.clone();
    let on_play = move |_| {
        let reference = vocab.with(|current| {
            current
                .get(&play_id)
                .map(|item| item.audio_reference.clone())
                .unwrap_or_default()
        });
        play_audio(&reference, set_notice);
    };

    let on_remove = move |_| {
        set_vocab.update(|current| match current.remove(&id) {
            Ok(removed) => revoke_object_url(&removed.audio_reference),
            Err(error) => log::debug!("ignoring removal: {error}"),
        });
    };

    view! {
        <tr class="vocab-row">
            <td>
                <input class="field" prop:value=word on:input=on_word />
            </td>
            <td>
                <input class="field" prop:value=meaning on:input=on_meaning />
            </td>
            <td class="audio-cell">
                <input type="file" accept="audio/*" on:change=on_upload />
                <button class="ghost" on:click=on_play>"🔊 Play"</button>
            </td>
            <td>
                <button class="danger" on:click=on_remove>"Remove"</button>
            </td>
        </tr>
    }
}

#[component]
fn VocabTable(
    rows: Memo<Vec<VocabItem>>,
    vocab: ReadSignal<Vocabulary>,
    set_vocab: WriteSignal<Vocabulary>,
    set_notice: WriteSignal<Option<Notice>>,
) -> impl IntoView {
    view! {
        <div class="table-wrap">
            <table class="vocab-table">
                <thead>
                    <tr>
                        <th>"Word"</th>
                        <th>"Meaning (VI)"</th>
                        <th>"Audio"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|item| item.id.clone()
                        children=move |item: VocabItem| {
                            view! {
                                <VocabRow
                                    id=item.id
                                    vocab=vocab
                                    set_vocab=set_vocab
                                    set_notice=set_notice
                                />
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn MatchBoard(vocab: ReadSignal<Vocabulary>) -> impl IntoView {
    let pairs = create_memo(move |_| {
        let mut rng = StdRng::from_entropy();
        vocab.with(|current| shuffle_pairs(&mut rng, current.items()))
    });

    view! {
        <div>
            <h4>"Match (click to mark pairs)"</h4>
            <div class="match-grid">
                <div class="match-column">
                    <h5>"Words"</h5>
                    <ul>
                        {move || {
                            pairs
                                .with(|current| {
                                    current
                                        .left
                                        .iter()
                                        .map(|card| view! { <li class="match-card">{card.text.clone()}</li> })
                                        .collect_view()
                                })
                        }}
                    </ul>
                </div>
                <div class="match-column">
                    <h5>"Meanings"</h5>
                    <ul>
                        {move || {
                            pairs
                                .with(|current| {
                                    current
                                        .right
                                        .iter()
                                        .map(|card| view! { <li class="match-card">{card.text.clone()}</li> })
                                        .collect_view()
                                })
                        }}
                    </ul>
                </div>
            </div>
            <p class="muted">
                "Static board: words and meanings are reshuffled whenever the list changes."
            </p>
        </div>
    }
}

#[component]
fn FlashcardPanel(
    vocab: ReadSignal<Vocabulary>,
    set_notice: WriteSignal<Option<Notice>>,
) -> impl IntoView {
    let (card, set_card) = create_signal(Flashcard::default());

    create_effect(move |_| {
        let len = vocab.with(Vocabulary::len);
        set_card.update(|current| current.clamp(len));
    });

    let on_prev = move |_| {
        let len = vocab.with_untracked(Vocabulary::len);
        set_card.update(|current| current.prev(len));
    };
    let on_next = move |_| {
        let len = vocab.with_untracked(Vocabulary::len);
        set_card.update(|current| current.next(len));
    };

    view! {
        <div class="flashcard">
            <div class="muted">"Flashcard: meaning shown first"</div>
            {move || {
                let state = card.get();
                vocab
                    .with(|current| {
                        match state.current(current.items()) {
                            Some(item) => {
                                let audio = item.audio_reference.clone();
                                let reveal = if state.is_revealed() {
                                    format!("Reveal: {}", item.word)
                                } else {
                                    "(Flip to reveal word)".to_string()
                                };

                                view! {
                                    <div class="flashcard-body">
                                        <div class="flashcard-meaning">{item.meaning.clone()}</div>
                                        <div class="flashcard-reveal">{reveal}</div>
                                        <div class="flashcard-actions">
                                            <button class="ghost" on:click=on_prev>"Prev"</button>
                                            <button
                                                class="primary"
                                                on:click=move |_| set_card.update(Flashcard::flip)
                                            >
                                                "Flip"
                                            </button>
                                            <button class="ghost" on:click=on_next>"Next"</button>
                                            <button
                                                class="ghost"
                                                on:click=move |_| play_audio(&audio, set_notice)
                                            >
                                                "🔊"
                                            </button>
                                        </div>
                                    </div>
                                }
                                    .into_view()
                            }
                            None => {
                                view! { <div class="muted">"No vocab yet. Add words above."</div> }
                                    .into_view()
                            }
                        }
                    })
            }}
        </div>
    }
}

#[component]
fn PracticeGrid(
    vocab: ReadSignal<Vocabulary>,
    set_notice: WriteSignal<Option<Notice>>,
) -> impl IntoView {
    view! {
        <div>
            <h4>"Practice: quick review"</h4>
            <div class="practice-grid">
                {move || {
                    vocab
                        .with(|current| {
                            practice_preview(current.items())
                                .iter()
                                .map(|item| {
                                    let audio = item.audio_reference.clone();
                                    view! {
                                        <div class="practice-card">
                                            <div>
                                                <div class="strong">{item.word.clone()}</div>
                                                <div class="muted">{item.meaning.clone()}</div>
                                            </div>
                                            <button
                                                class="ghost"
                                                on:click=move |_| play_audio(&audio, set_notice)
                                            >
                                                "🔊"
                                            </button>
                                        </div>
                                    }
                                })
                                .collect_view()
                        })
                }}
            </div>
        </div>
    }
}

#[component]
fn VocabSection(
    vocab: ReadSignal<Vocabulary>,
    set_vocab: WriteSignal<Vocabulary>,
    set_notice: WriteSignal<Option<Notice>>,
) -> impl IntoView {
    let (search, set_search) = create_signal(String::new());
    let (mode, set_mode) = create_signal(VocabMode::default());

    let filtered = create_memo(move |_| {
        let query = search.get();
        vocab.with(|current| {
            filter_vocabulary(current.items(), &query)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    let add_word = move |_| {
        set_vocab.update(|current| {
            current.add_placeholder();
        });
    };

    view! {
        <article class="card">
            <div class="card-header">
                <h2>"1. Vocab"</h2>
                <div class="muted">"Mode:"</div>
            </div>
            <div class="toolbar">
                <input
                    class="field grow"
                    placeholder="Search vocab or meaning"
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <button class="primary" on:click=add_word>"Add word"</button>
            </div>
            <div class="tabs">
                {VocabMode::ALL
                    .into_iter()
                    .map(|option| {
                        view! {
                            <button
                                class=move || tab_class(mode.get() == option)
                                on:click=move |_| set_mode.set(option)
                            >
                                {option.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <VocabTable rows=filtered vocab=vocab set_vocab=set_vocab set_notice=set_notice />
            <div class="mode-panel">
                {move || match mode.get() {
                    VocabMode::Match => view! { <MatchBoard vocab=vocab /> }.into_view(),
                    VocabMode::Flashcard => {
                        view! { <FlashcardPanel vocab=vocab set_notice=set_notice /> }.into_view()
                    }
                    VocabMode::Practice => {
                        view! { <PracticeGrid vocab=vocab set_notice=set_notice /> }.into_view()
                    }
                }}
            </div>
        </article>
    }
}

#[component]
fn LessonSection(lesson: ReadSignal<LessonDraft>, set_lesson: WriteSignal<LessonDraft>) -> impl IntoView {
    view! {
        <article class="card">
            <h2>"2. Lesson"</h2>
            <p class="muted">
                "Paste your teaching video link (YouTube/Vimeo). Watch links are turned into embeds."
            </p>
            <input
                class="field"
                placeholder="YouTube url (https://www.youtube.com/watch?v=...)"
                prop:value=move || lesson.with(|draft| draft.video_url.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    set_lesson.update(|draft| draft.video_url = value);
                }
            />
            {move || {
                lesson
                    .with(|draft| {
                        let url = draft.video_url.trim().to_string();
                        (!url.is_empty()).then(|| view! { <VideoFrame url=url title="lesson-video" /> })
                    })
            }}
            <label class="label">"Teacher notes / lesson chapters"</label>
            <textarea
                class="field tall"
                placeholder="Your lesson outline or notes..."
                prop:value=move || lesson.with(|draft| draft.notes.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    set_lesson.update(|draft| draft.notes = value);
                }
            ></textarea>
        </article>
    }
}

#[component]
fn ExampleSection(
    example: ReadSignal<ExampleDraft>,
    set_example: WriteSignal<ExampleDraft>,
) -> impl IntoView {
    let (kind, set_kind) = create_signal(ExampleKind::default());
    let (preview, set_preview) = create_signal::<Option<String>>(None);

    let select_kind = move |next: ExampleKind| {
        set_kind.set(next);
        set_preview.set(None);
    };

    let preview_scramble = move |_| {
        let sentence = example.with(|draft| draft.scramble_sentence.clone());
        let mut rng = StdRng::from_entropy();
        set_preview.set(Some(scramble_sentence(&mut rng, &sentence)));
    };

    let preview_fill = move |_| {
        let template = example.with(|draft| draft.fill_template.clone());
        set_preview.set(Some(fill_blank_preview(&template)));
    };

    view! {
        <article class="card">
            <h2>"3. Example"</h2>
            <p class="muted">
                "Interactive example templates: scramble sentence, fill-in-the-blank, choose missing word, short answer."
            </p>
            <div class="tabs">
                {ExampleKind::ALL
                    .into_iter()
                    .map(|option| {
                        view! {
                            <button
                                class=move || tab_class(kind.get() == option)
                                on:click=move |_| select_kind(option)
                            >
                                {option.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            {move || match kind.get() {
                ExampleKind::Scramble => {
                    view! {
                        <div>
                            <label class="label">
                                "Enter the correct sentence (will be scrambled for the learner)"
                            </label>
                            <input
                                class="field"
                                placeholder="E.g. The quick brown fox jumps over the lazy dog."
                                prop:value=move || example.with(|draft| draft.scramble_sentence.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    set_example.update(|draft| draft.scramble_sentence = value);
                                }
                            />
                            <button class="primary" on:click=preview_scramble>
                                "Preview scrambled"
                            </button>
                        </div>
                    }
                        .into_view()
                }
                ExampleKind::FillBlank => {
                    view! {
                        <div>
                            <label class="label">"Fill-in-the-blank template (use __ for blanks)"</label>
                            <input
                                class="field"
                                placeholder="E.g. The area of a circle is __ * r^2."
                                prop:value=move || example.with(|draft| draft.fill_template.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    set_example.update(|draft| draft.fill_template = value);
                                }
                            />
                            <p class="muted">
                                {move || {
                                    let blanks = example.with(|draft| count_blanks(&draft.fill_template));
                                    format!("{blanks} blank(s)")
                                }}
                            </p>
                            <button class="primary" on:click=preview_fill>"Preview"</button>
                        </div>
                    }
                        .into_view()
                }
                ExampleKind::Choose => {
                    view! {
                        <div class="sample-mcq">
                            <div class="muted">"Sample MCQ preview"</div>
                            <div class="strong">"Q: What is 2 + 3?"</div>
                            <div class="choice-grid">
                                {["A. 4", "B. 5", "C. 6", "D. 7"]
                                    .into_iter()
                                    .map(|choice| view! { <button class="ghost">{choice}</button> })
                                    .collect_view()}
                            </div>
                        </div>
                    }
                        .into_view()
                }
                ExampleKind::ShortAnswer => {
                    view! {
                        <div>
                            <label class="label">"Short-answer prompt"</label>
                            <textarea
                                class="field tall"
                                placeholder="E.g. Explain why the derivative of x^2 is 2x..."
                                prop:value=move || example.with(|draft| draft.short_prompt.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    set_example.update(|draft| draft.short_prompt = value);
                                }
                            ></textarea>
                        </div>
                    }
                        .into_view()
                }
            }}
            {move || preview.get().map(|text| view! { <div class="preview">{text}</div> })}
        </article>
    }
}

#[component]
fn ApplicationSection(
    application: ReadSignal<ApplicationDraft>,
    set_application: WriteSignal<ApplicationDraft>,
) -> impl IntoView {
    view! {
        <article class="card">
            <h2>"4. Application"</h2>
            <p class="muted">
                "Real-world tasks: paste two videos and attach applied math problems below."
            </p>
            <div class="two-columns">
                {(0..2usize)
                    .map(|slot| {
                        view! {
                            <div>
                                <label class="label">{format!("Video {} URL", slot + 1)}</label>
                                <input
                                    class="field"
                                    placeholder="Paste YouTube/Vimeo URL"
                                    prop:value=move || application.with(|draft| draft.video_urls[slot].clone())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        set_application.update(|draft| draft.video_urls[slot] = value);
                                    }
                                />
                                {move || {
                                    application
                                        .with(|draft| {
                                            let url = draft.video_urls[slot].trim().to_string();
                                            (!url.is_empty())
                                                .then(|| view! { <VideoFrame url=url title="application-video" /> })
                                        })
                                }}
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <label class="label">"Applied problem set"</label>
            <textarea
                class="field tall"
                placeholder="Write applied tasks here (students will solve after watching videos)"
                prop:value=move || application.with(|draft| draft.problems.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    set_application.update(|draft| draft.problems = value);
                }
            ></textarea>
        </article>
    }
}

#[component]
fn ExerciseSection() -> impl IntoView {
    let (responses, set_responses) = create_signal(Responses::default());
    let (submitted, set_submitted) = create_signal::<Option<String>>(None);

    let questions = sample_questions()
        .into_iter()
        .map(|question| {
            let id = question.id;
            let input = match question.kind {
                QuestionKind::ShortAnswer => view! {
                    <textarea
                        class="field"
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            set_responses.update(|current| current.record(id, value));
                        }
                    ></textarea>
                }
                .into_view(),
                QuestionKind::MultipleChoice | QuestionKind::TrueFalse => view! {
                    <div class="choices">
                        {question
                            .choices()
                            .into_iter()
                            .map(|choice| {
                                let label = choice.clone();
                                view! {
                                    <label class="choice">
                                        <input
                                            type="radio"
                                            name=format!("q{id}")
                                            on:change=move |_| {
                                                set_responses.update(|current| current.record(id, choice.clone()))
                                            }
                                        />
                                        <span>{label}</span>
                                    </label>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_view(),
            };

            view! {
                <div class="question">
                    <div class="strong">{format!("Q{}. {}", id, question.prompt)}</div>
                    {input}
                </div>
            }
        })
        .collect_view();

    view! {
        <article class="card">
            <h2>"5. Exercise"</h2>
            <p class="muted">
                "Practice test: multiple choice, true/false, short answer. Answers are shown as submitted."
            </p>
            <div class="questions">{questions}</div>
            <button
                class="primary"
                on:click=move |_| set_submitted.set(Some(responses.with(Responses::submission_summary)))
            >
                "Submit Answers"
            </button>
            {move || submitted.get().map(|summary| view! { <pre class="preview">{summary}</pre> })}
        </article>
    }
}

#[component]
fn SettingsPanel(
    settings: ReadSignal<ChapterSettings>,
    set_settings: WriteSignal<ChapterSettings>,
) -> impl IntoView {
    view! {
        <div class="card">
            <h3>"Chapter Settings"</h3>
            <label class="label">"Chapter title"</label>
            <input
                class="field"
                placeholder="Chapter name..."
                prop:value=move || settings.with(|current| current.title.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    set_settings.update(|current| current.title = value);
                }
            />
            <label class="label">"Tags (comma separated)"</label>
            <input
                class="field"
                placeholder="e.g. algebra, functions"
                prop:value=move || settings.with(|current| current.tags.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    set_settings.update(|current| current.tags = value);
                }
            />
            <div class="tag-list">
                {move || {
                    settings
                        .with(ChapterSettings::tag_list)
                        .into_iter()
                        .map(|tag| view! { <span class="tag">{tag}</span> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
fn ChatWidget(delay_ms: u32) -> impl IntoView {
    let (transcript, set_transcript) = create_signal(ChatTranscript::new());
    let (open, set_open) = create_signal(false);
    let (draft, set_draft) = create_signal(String::new());
    let pending: Rc<RefCell<ReplyTimers<Timeout>>> = Rc::default();

    let teardown = Rc::clone(&pending);
    on_cleanup(move || teardown.borrow_mut().clear());

    let send = move || {
        let text = draft.get_untracked();
        let mut reply = None;
        set_transcript.update(|current| reply = current.submit(&text));
        let Some(reply) = reply else {
            return;
        };

        set_draft.set(String::new());
        let timers = Rc::clone(&pending);
        pending.borrow_mut().insert_with(move |key| {
            Timeout::new(delay_ms, move || {
                set_transcript.update(|current| current.deliver(reply));
                // The handle owns this callback, so release it after returning.
                spawn_local(async move {
                    timers.borrow_mut().remove(key);
                });
            })
        });
    };
    let send_on_enter = send.clone();

    view! {
        <div class="chat" class:chat-open=move || open.get()>
            <div class="chat-header">
                <div class="strong">"Devalicath Bot"</div>
                <div class="chat-controls">
                    <button class="ghost" on:click=move |_| set_transcript.update(ChatTranscript::reset)>
                        "Reset"
                    </button>
                    <button class="ghost" on:click=move |_| set_open.update(|current| *current = !*current)>
                        {move || if open.get() { "—" } else { "✧" }}
                    </button>
                </div>
            </div>
            <div class="chat-closed" class:hidden=move || open.get()>
                "Need help? Click to open chat."
            </div>
            <div class="chat-body" class:hidden=move || !open.get()>
                <div class="chat-log">
                    {move || {
                        transcript
                            .with(|current| {
                                current
                                    .messages()
                                    .iter()
                                    .map(|message| {
                                        let class = match message.speaker {
                                            Speaker::Bot => "bubble bubble-bot",
                                            Speaker::User => "bubble bubble-user",
                                        };
                                        view! { <div class=class>{message.text.clone()}</div> }
                                    })
                                    .collect_view()
                            })
                    }}
                </div>
                <div class="chat-input">
                    <input
                        class="field grow"
                        placeholder="Ask a question..."
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                        on:keydown=move |ev: KeyboardEvent| {
                            if ev.key() == "Enter" {
                                send_on_enter();
                            }
                        }
                    />
                    <button class="primary" on:click=move |_| send()>"Send"</button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn App(config: ChapterConfig) -> impl IntoView {
    let store = BrowserStore::new(config.storage_key.clone());
    let (vocab, set_vocab) = create_signal(load_vocabulary(&store));
    let (notice, set_notice) = create_signal::<Option<Notice>>(None);
    let (settings, set_settings) = create_signal(ChapterSettings::default());
    let (lesson, set_lesson) = create_signal(LessonDraft::default());
    let (example, set_example) = create_signal(ExampleDraft::default());
    let (application, set_application) = create_signal(ApplicationDraft::default());
    let (export, set_export) = create_signal::<Option<String>>(None);

    let persist_store = store.clone();
    create_effect(move |_| vocab.with(|current| save_vocabulary(&persist_store, current)));

    let clear_saved = move |_| match store.clear() {
        Ok(()) => set_notice.set(Some(Notice::info("Saved vocab cleared."))),
        Err(error) => set_notice.set(Some(Notice::warning(error.to_string()))),
    };

    let export_chapter = move |_| {
        let snapshot = ChapterExport::new(
            &settings.get(),
            &vocab.get(),
            &lesson.get(),
            &example.get(),
            &application.get(),
        );
        match snapshot.to_json() {
            Ok(json) => set_export.set(Some(json)),
            Err(error) => set_notice.set(Some(Notice::warning(format!("Export failed: {error}")))),
        }
    };

    view! {
        <div class="page">
            <header class="page-header">
                <h1>{move || settings.with(|current| current.title.clone())}</h1>
                <div class="lede">"Chapter editor (Vocab / Lesson / Example / Application / Exercise)"</div>
            </header>
            <NoticeBanner notice=notice set_notice=set_notice />
            <main class="layout">
                <section class="content">
                    <VocabSection vocab=vocab set_vocab=set_vocab set_notice=set_notice />
                    <LessonSection lesson=lesson set_lesson=set_lesson />
                    <ExampleSection example=example set_example=set_example />
                    <ApplicationSection application=application set_application=set_application />
                    <ExerciseSection />
                </section>
                <aside class="sidebar">
                    <SettingsPanel settings=settings set_settings=set_settings />
                    <div class="card">
                        <h3>"Quick actions"</h3>
                        <button class="ghost" on:click=clear_saved>"Clear saved vocab"</button>
                        <button class="primary" on:click=export_chapter>"Export chapter"</button>
                        {move || {
                            export
                                .get()
                                .map(|json| view! { <textarea class="field tall" readonly=true prop:value=json></textarea> })
                        }}
                    </div>
                    <div class="card muted">
                        <div class="strong">"Chatbot"</div>
                        "A small help-chat is available bottom-right for students to ask questions while doing exercises."
                    </div>
                </aside>
            </main>
            <footer class="page-footer">"Devalicath: made for teachers."</footer>
            <ChatWidget delay_ms=config.chat_reply_delay_ms />
        </div>
    }
}

/// Installs logging and panic hooks, then mounts the chapter page onto `<body>`.
pub fn mount(config: ChapterConfig) {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
    log::info!("mounting chapter page, vocabulary key {}", config.storage_key);

    mount_to_body(move || view! { <App config=config /> });
}
