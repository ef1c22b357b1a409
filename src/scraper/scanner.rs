//! Tag-stream scanner: turns raw markup into start-tag, end-tag, and text events.
//!
//! Built on the html5ever tokenizer, so malformed markup never errors; it just
//! produces whatever events the tokenizer recovers. No chapter knowledge here.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag as RawTag, TagKind as RawTagKind, Token, TokenSink, TokenSinkResult,
    Tokenizer, TokenizerOpts, TokenizerResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Start,
    End,
}

/// One start or end tag. Names are lower-case; end tags carry no attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub kind: TagKind,
    pub name: String,
    pub attrs: Vec<(String, String)>,
}

impl Tag {
    pub fn start(name: &str, attrs: &[(&str, &str)]) -> Self {
        Self {
            kind: TagKind::Start,
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn end(name: &str) -> Self {
        Self {
            kind: TagKind::End,
            name: name.to_string(),
            attrs: Vec::new(),
        }
    }

    pub fn is_start(&self, name: &str) -> bool {
        self.kind == TagKind::Start && self.name == name
    }

    pub fn is_end(&self, name: &str) -> bool {
        self.kind == TagKind::End && self.name == name
    }

    /// Value of the first attribute with this name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// True if the class attribute contains `class` as one whitespace-separated token.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|t| t == class))
            .unwrap_or(false)
    }

    fn from_raw(raw: &RawTag) -> Self {
        let kind = match raw.kind {
            RawTagKind::StartTag => TagKind::Start,
            RawTagKind::EndTag => TagKind::End,
        };
        let attrs = match kind {
            TagKind::Start => raw
                .attrs
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect(),
            TagKind::End => Vec::new(),
        };
        Self {
            kind,
            name: raw.name.to_string(),
            attrs,
        }
    }
}

/// Receiver of scanner events, in document order.
pub trait TagHandler {
    fn start_tag(&mut self, tag: &Tag);
    fn end_tag(&mut self, tag: &Tag);
    fn text(&mut self, data: &str);
}

/// Adapts html5ever tokens to [TagHandler] events, coalescing adjacent text.
struct EventSink<'h, H: TagHandler> {
    handler: &'h mut H,
    text: String,
}

impl<H: TagHandler> EventSink<'_, H> {
    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let data = std::mem::take(&mut self.text);
            self.handler.text(&data);
        }
    }
}

impl<H: TagHandler> TokenSink for EventSink<'_, H> {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(chars) => {
                self.text.push_str(&chars);
            }
            Token::NullCharacterToken | Token::ParseError(_) => {}
            Token::TagToken(raw) => {
                self.flush_text();
                let tag = Tag::from_raw(&raw);
                match tag.kind {
                    TagKind::Start => {
                        self.handler.start_tag(&tag);
                        if raw.self_closing {
                            self.handler.end_tag(&Tag::end(&tag.name));
                        } else {
                            // Script and style bodies are not markup.
                            match tag.name.as_str() {
                                "script" => {
                                    return TokenSinkResult::RawData(RawKind::ScriptData)
                                }
                                "style" => return TokenSinkResult::RawData(RawKind::Rawtext),
                                _ => {}
                            }
                        }
                    }
                    TagKind::End => self.handler.end_tag(&tag),
                }
            }
            Token::CommentToken(_) | Token::DoctypeToken(_) | Token::EOFToken => {
                self.flush_text();
            }
        }
        TokenSinkResult::Continue
    }

    fn end(&mut self) {
        self.flush_text();
    }
}

/// Scan `markup` in one pass, delivering events to `handler`.
pub fn scan<H: TagHandler>(markup: &str, handler: &mut H) {
    let sink = EventSink {
        handler,
        text: String::new(),
    };
    let mut tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(markup));
    match tokenizer.feed(&mut input) {
        TokenizerResult::Done => {}
        // Only a sink returning `TokenSinkResult::Script` pauses the tokenizer; EventSink never does.
        TokenizerResult::Script(()) => {}
    }
    tokenizer.end();
}
