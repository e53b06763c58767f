#[cfg(target_arch = "wasm32")]
fn main() {
    chapter_studio::wasm::mount(chapter_studio::ChapterConfig::default());
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("chapter-studio is a browser app: build it for wasm32 and serve it with `trunk serve`.");
}
