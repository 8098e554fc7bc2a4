use crate::assemble::ParsedItem;

/// Events flowing between the host's IO tasks and its event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    TextInput { text: String, source: TextSource },
    ShowItem(ParsedItem),
    Reload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Ocr,
    Stdin,
    Manual,
}
