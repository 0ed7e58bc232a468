use std::io::{Result, Write};

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{Document, NodeContent, NodeId};

impl Document {
    /// Write the HTML of the node and its descendants.
    pub fn write_html(&self, id: NodeId, w: &mut impl Write) -> Result<()> {
        match self.content(id) {
            NodeContent::Document => self.write_inner_html(id, w)?,
            NodeContent::Doctype(x) => write!(w, "<!{}>", x)?,
            NodeContent::Comment(x) => write!(w, "<!--{}-->", x)?,
            NodeContent::Text(x) => {
                let raw = self
                    .parent(id)
                    .and_then(|p| self.element(p))
                    .map(|p| p.is_raw_text())
                    .unwrap_or(false);
                if raw {
                    write!(w, "{}", x)?;
                } else {
                    write!(w, "{}", encode_text(x))?;
                }
            }
            NodeContent::Element(elem) => {
                write!(w, "<{}", elem.tag_name)?;
                for (name, value) in elem.attributes.iter() {
                    if value.is_empty() {
                        write!(w, " {}", name)?;
                    } else {
                        write!(w, r#" {}="{}""#, name, encode_double_quoted_attribute(value))?;
                    }
                }
                write!(w, ">")?;
                if !elem.is_void() {
                    self.write_inner_html(id, w)?;
                    write!(w, "</{}>", elem.tag_name)?;
                }
            }
        }
        Ok(())
    }

    /// Write the HTML of the child nodes.
    pub fn write_inner_html(&self, id: NodeId, w: &mut impl Write) -> Result<()> {
        for child in self.children(id) {
            self.write_html(child, w)?;
        }
        Ok(())
    }

    /// Get the HTML of the child nodes.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut ret = vec![];
        // writing to a `Vec` never fails
        let _ = self.write_inner_html(id, &mut ret);
        String::from_utf8(ret).unwrap_or_default()
    }

    /// Get the HTML of the node itself.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut ret = vec![];
        let _ = self.write_html(id, &mut ret);
        String::from_utf8(ret).unwrap_or_default()
    }
}
