//! HTML信号文本提取器
//! 基于 html5ever 分词器流式提取：footer文本、meta content、注释、资源引用（src/href）
//! 畸形HTML不会报错，无法解析的片段直接视为不存在

use std::cell::RefCell;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts
};
use markup5ever::interface::Attribute;
use tendril::StrTendril;

/// 单个HTML文档中提取到的信号文本
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SignalTexts {
    /// 第一个 footer 元素的文本（已合并空白）
    pub footer: Option<String>,
    /// 所有 meta 的 content 值
    pub meta_contents: Vec<String>,
    /// 所有注释正文
    pub comments: Vec<String>,
    /// script/link/img 的 src（缺失时回退 href）
    pub asset_refs: Vec<String>,
}

impl SignalTexts {
    /// 按固定顺序遍历：footer -> meta -> 注释 -> 资源引用
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.footer
            .iter()
            .map(String::as_str)
            .chain(self.meta_contents.iter().map(String::as_str))
            .chain(self.comments.iter().map(String::as_str))
            .chain(self.asset_refs.iter().map(String::as_str))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// footer 采集状态，只采集文档中的第一个 footer
#[derive(Debug, Default)]
enum FooterState {
    #[default]
    Before,
    Inside { depth: usize },
    Done,
}

#[derive(Debug, Default)]
struct SinkState {
    texts: SignalTexts,
    footer: FooterState,
    footer_parts: Vec<String>,
    footer_current: String,
    // 处于 script/style 等非文本内容中
    in_raw_text: bool,
}

impl SinkState {
    fn flush_footer_text(&mut self) {
        let text = self.footer_current.trim();
        if !text.is_empty() {
            self.footer_parts.push(text.to_string());
        }
        self.footer_current.clear();
    }

    fn finish_footer(&mut self) {
        self.flush_footer_text();
        let joined = self.footer_parts.join(" ");
        self.texts.footer = Some(joined.split_whitespace().collect::<Vec<_>>().join(" "));
        self.footer_parts.clear();
        self.footer = FooterState::Done;
    }

    fn on_start_tag(&mut self, tag: &Tag) {
        if let FooterState::Inside { depth } = &mut self.footer {
            if &*tag.name == "footer" {
                *depth += 1;
            }
            self.flush_footer_text();
        } else if matches!(self.footer, FooterState::Before) && &*tag.name == "footer" {
            self.footer = FooterState::Inside { depth: 1 };
        }

        match &*tag.name {
            "meta" => self.extract_meta_content(&tag.attrs),
            "script" | "link" | "img" => self.extract_asset_ref(&tag.attrs),
            _ => {}
        }
    }

    fn on_end_tag(&mut self, tag: &Tag) {
        if raw_kind(&tag.name).is_some() {
            self.in_raw_text = false;
        }

        if let FooterState::Inside { depth } = &mut self.footer {
            if &*tag.name == "footer" {
                *depth -= 1;
                if *depth == 0 {
                    self.finish_footer();
                    return;
                }
            }
            self.flush_footer_text();
        }
    }

    fn on_characters(&mut self, text: &str) {
        if self.in_raw_text {
            return;
        }
        if let FooterState::Inside { .. } = self.footer {
            self.footer_current.push_str(text);
        }
    }

    /// 提取 meta content（忽略空值）
    fn extract_meta_content(&mut self, attrs: &[Attribute]) {
        if let Some(content) = find_attr(attrs, "content") {
            self.texts.meta_contents.push(content.to_string());
        }
    }

    /// 提取资源引用，src 缺失或为空时回退 href
    fn extract_asset_ref(&mut self, attrs: &[Attribute]) {
        let reference = find_attr(attrs, "src").or_else(|| find_attr(attrs, "href"));
        if let Some(reference) = reference {
            self.texts.asset_refs.push(reference.to_string());
        }
    }
}

/// 内容不按标签解析的元素：title/textarea 为可转义文本，其余为原始文本
fn raw_kind(name: &str) -> Option<RawKind> {
    match name {
        "title" | "textarea" => Some(RawKind::Rcdata),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(RawKind::Rawtext),
        "script" => Some(RawKind::ScriptData),
        _ => None,
    }
}

/// 查找非空属性值（重复属性只保留第一个）
fn find_attr<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|attr| &*attr.name.local == name)
        .map(|attr| &*attr.value)
        .filter(|value: &&str| !value.is_empty())
}

#[derive(Debug, Default)]
struct SignalSink {
    state: RefCell<SinkState>,
}

impl TokenSink for SignalSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        let mut state = self.state.borrow_mut();
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => {
                    state.on_start_tag(&tag);
                    // 这些元素的内容中的 `<` 不是标签，避免凭空产生 meta/注释/资源引用
                    if !tag.self_closing {
                        if let Some(kind) = raw_kind(&tag.name) {
                            // title/textarea 的内容仍是可见文本
                            state.in_raw_text = !matches!(kind, RawKind::Rcdata);
                            return TokenSinkResult::RawData(kind);
                        }
                    }
                }
                TagKind::EndTag => state.on_end_tag(&tag),
            },
            Token::CommentToken(comment) => state.texts.comments.push(comment.to_string()),
            Token::CharacterTokens(text) => state.on_characters(&text),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// HTML信号文本提取器
#[derive(Debug, Default)]
pub struct HtmlExtractor;

impl HtmlExtractor {
    /// 从HTML字符串提取信号文本
    pub fn extract(html: &str) -> SignalTexts {
        let tokenizer = Tokenizer::new(SignalSink::default(), TokenizerOpts::default());
        let queue = BufferQueue::default();
        queue.push_back(StrTendril::from(html));

        let _ = tokenizer.feed(&queue);
        tokenizer.end();

        let mut state = tokenizer.sink.state.into_inner();
        // 未闭合的 footer 截至文档末尾
        if let FooterState::Inside { .. } = state.footer {
            state.finish_footer();
        }
        state.texts
    }
}
