use html_escape::decode_html_entities;

use crate::{Document, ElementData, NodeContent, NodeId};

// tags that are implicitly closed when a sibling of the same kind starts
const AUTO_CLOSE: [&str; 3] = ["li", "p", "option"];

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn is_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map(|c| c.is_ascii_whitespace()).unwrap_or(false) {
            self.bump();
        }
    }

    fn take_while(&mut self, f: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().map(|c| f(c)).unwrap_or(false) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    // consume until `pat` (excluded); the cursor moves past `pat`
    fn take_until(&mut self, pat: &str) -> &'a str {
        let start = self.pos;
        match self.rest().find(pat) {
            Some(offset) => {
                self.pos += offset + pat.len();
                &self.src[start..start + offset]
            }
            None => {
                self.pos = self.src.len();
                &self.src[start..]
            }
        }
    }

    fn starts_with_ignore_case(&self, pat: &str) -> bool {
        let rest = self.rest().as_bytes();
        rest.len() >= pat.len() && rest[..pat.len()].eq_ignore_ascii_case(pat.as_bytes())
    }
}

struct TreeBuilder<'a> {
    doc: &'a mut Document,
    // the first item is the parse target and is never popped
    open: Vec<NodeId>,
}

impl<'a> TreeBuilder<'a> {
    fn current(&self) -> NodeId {
        self.open[self.open.len() - 1]
    }

    fn current_tag(&self) -> Option<&str> {
        if self.open.len() <= 1 {
            return None;
        }
        self.doc
            .element(self.current())
            .map(|x| x.tag_name.as_str())
    }

    fn append(&mut self, content: NodeContent) -> NodeId {
        let id = self.doc.create_node(content);
        let parent = self.current();
        self.doc.append(parent, id);
        id
    }

    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let text = decode_html_entities(text);
        // merge with the previous text node
        if let Some(last) = self.doc.last_child(self.current()) {
            if let NodeContent::Text(x) = self.doc.content_mut(last) {
                x.push_str(&text);
                return;
            }
        }
        self.append(NodeContent::Text(text.into_owned()));
    }

    fn open(&mut self, elem: ElementData, self_closing: bool) -> NodeId {
        let tag_name = elem.tag_name.as_str();
        if AUTO_CLOSE.contains(&tag_name) && self.current_tag() == Some(tag_name) {
            self.open.pop();
        }
        let is_void = self_closing || elem.is_void();
        let id = self.append(NodeContent::Element(elem));
        if !is_void {
            self.open.push(id);
        }
        id
    }

    fn close(&mut self, tag_name: &str) {
        let found = self.open[1..].iter().rposition(|x| {
            self.doc
                .element(*x)
                .map(|x| x.tag_name == tag_name)
                .unwrap_or(false)
        });
        if let Some(index) = found {
            self.open.truncate(index + 1);
        } else {
            log::trace!("Unmatched closing tag </{}> ignored", tag_name);
        }
    }
}

fn is_tag_name_char(c: char) -> bool {
    !c.is_ascii_whitespace() && c != '/' && c != '>'
}

fn is_attr_name_char(c: char) -> bool {
    !c.is_ascii_whitespace() && c != '/' && c != '>' && c != '='
}

fn parse_start_tag(cur: &mut Cursor) -> (ElementData, bool) {
    // the leading `<` is consumed
    let mut elem = ElementData::new(cur.take_while(is_tag_name_char));
    let mut self_closing = false;
    loop {
        cur.skip_whitespace();
        match cur.peek() {
            None => break,
            Some('>') => {
                cur.bump();
                break;
            }
            Some('/') => {
                cur.bump();
                if cur.peek() == Some('>') {
                    cur.bump();
                    self_closing = true;
                    break;
                }
                continue;
            }
            _ => {}
        }
        let name = cur.take_while(is_attr_name_char).to_ascii_lowercase();
        cur.skip_whitespace();
        let value = if cur.peek() == Some('=') {
            cur.bump();
            cur.skip_whitespace();
            match cur.peek() {
                Some('"') => {
                    cur.bump();
                    cur.take_until("\"")
                }
                Some('\'') => {
                    cur.bump();
                    cur.take_until("'")
                }
                _ => cur.take_while(|c| !c.is_ascii_whitespace() && c != '>'),
            }
        } else {
            ""
        };
        if name.is_empty() {
            continue;
        }
        if elem.attribute(&name).is_none() {
            let value = decode_html_entities(value).into_owned();
            elem.attributes.push((name, value));
        }
    }
    (elem, self_closing)
}

/// Parse `html` and append the result to `parent` .
pub(crate) fn parse_into(doc: &mut Document, parent: NodeId, html: &str) {
    let mut cur = Cursor { src: html, pos: 0 };
    let mut builder = TreeBuilder {
        doc,
        open: vec![parent],
    };
    while !cur.is_end() {
        if cur.starts_with_ignore_case("<!--") {
            cur.pos += 4;
            let comment = cur.take_until("-->");
            builder.append(NodeContent::Comment(comment.to_string()));
            continue;
        }
        if cur.starts_with_ignore_case("<!") {
            cur.pos += 2;
            let decl = cur.take_until(">");
            builder.append(NodeContent::Doctype(decl.to_string()));
            continue;
        }
        if cur.starts_with_ignore_case("</") {
            cur.pos += 2;
            let tag_name = cur.take_while(is_tag_name_char).to_ascii_lowercase();
            cur.take_until(">");
            builder.close(&tag_name);
            continue;
        }
        let starts_tag = cur.peek() == Some('<')
            && cur.rest()[1..]
                .chars()
                .next()
                .map(|c| c.is_ascii_alphabetic())
                .unwrap_or(false);
        if starts_tag {
            cur.bump();
            let (elem, self_closing) = parse_start_tag(&mut cur);
            let raw_text = elem.is_raw_text() && !self_closing;
            let tag_name = elem.tag_name.clone();
            let id = builder.open(elem, self_closing);
            if raw_text {
                let end = format!("</{}", tag_name);
                let start = cur.pos;
                let len = cur.rest().to_ascii_lowercase().find(&end).unwrap_or(cur.rest().len());
                let content = &html[start..start + len];
                if !content.is_empty() {
                    let t = builder.doc.create_text_node(content);
                    builder.doc.append(id, t);
                }
                cur.pos = start + len;
                if !cur.is_end() {
                    cur.take_until(">");
                }
                builder.close(&tag_name);
            }
            continue;
        }
        // a text run, which contains at least one char
        let start = cur.pos;
        cur.bump();
        let len = cur.rest().find('<').unwrap_or(cur.rest().len());
        cur.pos += len;
        builder.text(&html[start..cur.pos]);
    }
}
