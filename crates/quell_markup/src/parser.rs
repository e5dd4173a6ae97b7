//! Hand-written parser for markup region content.
//!
//! Produces the [`Node`] tree consumed by the resolver. The parser covers
//! only the markup surface the resolver needs: elements with attributes,
//! `{{ }}` interpolations, comments, and text. Structural directives
//! (`v-if`/`v-else-if`/`v-else`, `v-for`) are folded into [`If`]/[`For`]
//! constructs in a second pass, and text-producing children are wrapped the
//! way a template compiler's transformed tree wraps them.
//!
//! The parser is tolerant: malformed input degrades to text or truncated
//! spans, never a panic. It does not evaluate expressions or validate the
//! embedding language.

use crate::node::{
    Attribute, Comment, Compound, Element, Expression, For, If, IfBranch, Interpolation, Node,
    Root, Text, TextCall,
};
use quell_source::{LineCol, Span};

/// Elements that never have a close tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Parses markup region content into a tree rooted at [`Node::Root`].
///
/// Positions in the tree are relative to `content`: line 1 is the first
/// content line. Empty content yields a root with no children.
pub fn parse_template(content: &str) -> Node {
    let mut parser = Parser::new(content);
    let children = parser.parse_children(None);
    let end = parser.last;
    Node::Root(Root {
        span: Span::new(LineCol::new(1, 1), end),
        children,
    })
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    col: u32,
    /// Position of the most recently consumed character.
    last: LineCol,
}

impl Parser {
    fn new(content: &str) -> Self {
        Self {
            chars: content.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
            last: LineCol::new(1, 1),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or('\0')
    }

    fn peek_at(&self, offset: usize) -> char {
        self.chars.get(self.pos + offset).copied().unwrap_or('\0')
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == c)
    }

    /// The position of the next (unconsumed) character.
    fn here(&self) -> LineCol {
        LineCol::new(self.line, self.col)
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.pos];
        self.last = self.here();
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        c
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            if self.at_end() {
                break;
            }
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    /// Parses sibling nodes until EOF or the close tag of `enclosing`.
    /// Directive folding and text wrapping are applied before returning.
    fn parse_children(&mut self, enclosing: Option<&str>) -> Vec<Node> {
        let mut raw = Vec::new();
        loop {
            if self.at_end() {
                break;
            }
            if self.starts_with("</") {
                if let Some(tag) = enclosing {
                    if self.close_tag_matches(tag) {
                        break;
                    }
                }
                // Stray close tag: discard it and continue.
                self.skip_through('>');
                continue;
            }
            if self.starts_with("<!--") {
                raw.push(self.parse_comment());
                continue;
            }
            if self.peek() == '<' && self.peek_at(1).is_ascii_alphabetic() {
                raw.push(self.parse_element());
                continue;
            }
            if self.starts_with("{{") {
                raw.push(self.parse_interpolation());
                continue;
            }
            raw.push(self.parse_text());
        }
        fold_children(raw)
    }

    /// Returns `true` if the upcoming `</...>` closes `tag`.
    fn close_tag_matches(&self, tag: &str) -> bool {
        let mut offset = 2;
        for expected in tag.chars() {
            if !self.peek_at(offset).eq_ignore_ascii_case(&expected) {
                return false;
            }
            offset += 1;
        }
        let next = self.peek_at(offset);
        next == '>' || next.is_whitespace() || next == '\0'
    }

    fn skip_through(&mut self, target: char) {
        while !self.at_end() {
            if self.advance() == target {
                return;
            }
        }
    }

    fn parse_comment(&mut self) -> Node {
        let start = self.here();
        self.advance_by(4); // <!--
        let mut content = String::new();
        while !self.at_end() && !self.starts_with("-->") {
            content.push(self.advance());
        }
        self.advance_by(3); // -->
        Node::Comment(Comment {
            span: Span::new(start, self.last),
            content,
        })
    }

    fn parse_interpolation(&mut self) -> Node {
        let start = self.here();
        self.advance_by(2); // {{
        let mut expression = String::new();
        while !self.at_end() && !self.starts_with("}}") {
            expression.push(self.advance());
        }
        self.advance_by(2); // }}
        Node::Interpolation(Interpolation {
            span: Span::new(start, self.last),
            expression: expression.trim().to_string(),
        })
    }

    fn parse_text(&mut self) -> Node {
        let start = self.here();
        let mut content = String::new();
        while !self.at_end() && self.peek() != '<' && !self.starts_with("{{") {
            content.push(self.advance());
        }
        Node::Text(Text {
            span: Span::new(start, self.last),
            content,
        })
    }

    fn parse_element(&mut self) -> Node {
        let start = self.here();
        self.advance(); // <
        let tag = self.read_name();
        let mut attributes = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            if self.at_end() {
                break;
            }
            if self.starts_with("/>") {
                self.advance_by(2);
                self_closing = true;
                break;
            }
            if self.peek() == '>' {
                self.advance();
                break;
            }
            attributes.push(self.parse_attribute());
        }

        if self_closing || VOID_TAGS.contains(&tag.as_str()) {
            return Node::Element(Element {
                tag,
                span: Span::new(start, self.last),
                attributes,
                children: Vec::new(),
                self_closing: true,
            });
        }

        let children = self.parse_children(Some(&tag));

        // Consume the close tag; at EOF the element ends where input does.
        if self.starts_with("</") {
            self.skip_through('>');
        }

        Node::Element(Element {
            tag,
            span: Span::new(start, self.last),
            attributes,
            children,
            self_closing: false,
        })
    }

    fn read_name(&mut self) -> String {
        let mut name = String::new();
        while !self.at_end() {
            let c = self.peek();
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                name.push(self.advance());
            } else {
                break;
            }
        }
        name
    }

    fn parse_attribute(&mut self) -> Attribute {
        let start = self.here();
        let mut name = String::new();
        while !self.at_end() {
            let c = self.peek();
            if c.is_whitespace() || c == '=' || c == '>' || (c == '/' && self.peek_at(1) == '>') {
                break;
            }
            name.push(self.advance());
        }

        if self.peek() != '=' {
            return Attribute {
                name,
                span: Span::new(start, self.last),
                value: None,
            };
        }
        self.advance(); // =

        let quote = self.peek();
        let value = if quote == '"' || quote == '\'' {
            self.advance();
            let value_start = self.here();
            let mut text = String::new();
            while !self.at_end() && self.peek() != quote {
                text.push(self.advance());
            }
            let value_end = if text.is_empty() { value_start } else { self.last };
            if !self.at_end() {
                self.advance(); // closing quote
            }
            Expression {
                text,
                span: Span::new(value_start, value_end),
            }
        } else {
            let value_start = self.here();
            let mut text = String::new();
            while !self.at_end() {
                let c = self.peek();
                if c.is_whitespace() || c == '>' || (c == '/' && self.peek_at(1) == '>') {
                    break;
                }
                text.push(self.advance());
            }
            Expression {
                text,
                span: Span::new(value_start, self.last),
            }
        };

        Attribute {
            name,
            span: Span::new(start, self.last),
            value: Some(value),
        }
    }
}

/// Second pass over raw siblings: drops whitespace-only text, folds
/// structural directives into [`If`]/[`For`] constructs, and wraps
/// interpolation-bearing text runs the way a transformed template tree does.
fn fold_children(raw: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::new();
    let mut iter = raw.into_iter().peekable();

    while let Some(node) = iter.next() {
        if is_blank_text(&node) {
            continue;
        }

        if let Node::Element(element) = &node {
            if let Some(condition) = directive_value(element, "v-if") {
                let mut branches = vec![make_branch(node, Some(condition))];
                loop {
                    // Whitespace-only text may sit between branches.
                    while iter.peek().is_some_and(is_blank_text) {
                        iter.next();
                    }
                    let Some(Node::Element(next)) = iter.peek() else {
                        break;
                    };
                    if let Some(condition) = directive_value(next, "v-else-if") {
                        let branch_node = iter.next().unwrap_or_else(|| unreachable!());
                        branches.push(make_branch(branch_node, Some(condition)));
                        continue;
                    }
                    if has_directive(next, "v-else") {
                        let branch_node = iter.next().unwrap_or_else(|| unreachable!());
                        branches.push(make_branch(branch_node, None));
                    }
                    break;
                }
                let span = Span::new(
                    branches[0].span().start,
                    branches[branches.len() - 1].span().end,
                );
                out.push(Node::If(If { span, branches }));
                continue;
            }

            if let Some(expression) = directive_value(element, "v-for") {
                let span = element.span;
                out.push(Node::For(For {
                    span,
                    expression: Some(expression),
                    children: vec![node],
                }));
                continue;
            }
        }

        match node {
            Node::Text(_) | Node::Interpolation(_) => {
                let mut run = vec![node];
                while matches!(iter.peek(), Some(Node::Text(_) | Node::Interpolation(_)))
                    && !iter.peek().is_some_and(is_blank_text)
                {
                    match iter.next() {
                        Some(part) => run.push(part),
                        None => break,
                    }
                }
                out.extend(wrap_text_run(run));
            }
            other => out.push(other),
        }
    }

    out
}

/// Wraps a run of adjacent text/interpolation parts. Pure text passes
/// through untouched; anything containing an interpolation is wrapped in a
/// text-call (with a compound node when the run has several parts).
fn wrap_text_run(run: Vec<Node>) -> Vec<Node> {
    if !run.iter().any(|n| matches!(n, Node::Interpolation(_))) {
        return run;
    }
    let span = Span::new(run[0].span().start, run[run.len() - 1].span().end);
    let content = if run.len() == 1 {
        let mut run = run;
        run.remove(0)
    } else {
        Node::Compound(Compound {
            span,
            children: run,
        })
    };
    vec![Node::TextCall(TextCall {
        span,
        content: Box::new(content),
    })]
}

fn is_blank_text(node: &Node) -> bool {
    matches!(node, Node::Text(t) if t.content.trim().is_empty())
}

fn has_directive(element: &Element, name: &str) -> bool {
    element.attributes.iter().any(|a| a.name == name)
}

fn directive_value(element: &Element, name: &str) -> Option<Expression> {
    element
        .attributes
        .iter()
        .find(|a| a.name == name)
        .and_then(|a| a.value.clone())
}

fn make_branch(element_node: Node, condition: Option<Expression>) -> Node {
    Node::IfBranch(IfBranch {
        span: element_node.span(),
        condition,
        children: vec![element_node],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_children(node: &Node) -> &[Node] {
        let Node::Root(root) = node else {
            panic!("expected root");
        };
        &root.children
    }

    #[test]
    fn empty_content() {
        let root = parse_template("");
        assert!(root_children(&root).is_empty());
    }

    #[test]
    fn single_element_span() {
        let root = parse_template("<div>hi</div>");
        let children = root_children(&root);
        assert_eq!(children.len(), 1);
        let Node::Element(el) = &children[0] else {
            panic!("expected element");
        };
        assert_eq!(el.tag, "div");
        assert_eq!(el.span, Span::from_parts(1, 1, 1, 13));
        assert_eq!(el.children.len(), 1);
    }

    #[test]
    fn interpolation_span_and_expression() {
        let root = parse_template("<p>{{ user.name }}</p>");
        let Node::Element(el) = &root_children(&root)[0] else {
            panic!("expected element");
        };
        let Node::TextCall(tc) = &el.children[0] else {
            panic!("expected text-call, got {}", el.children[0].kind_name());
        };
        let Node::Interpolation(interp) = tc.content.as_ref() else {
            panic!("expected interpolation");
        };
        assert_eq!(interp.expression, "user.name");
        // "{{ user.name }}" starts at col 4 and ends at col 18.
        assert_eq!(interp.span, Span::from_parts(1, 4, 1, 18));
    }

    #[test]
    fn attribute_value_span() {
        let root = parse_template("<div :class=\"style\"></div>");
        let Node::Element(el) = &root_children(&root)[0] else {
            panic!("expected element");
        };
        assert_eq!(el.attributes.len(), 1);
        let attr = &el.attributes[0];
        assert_eq!(attr.name, ":class");
        let value = attr.value.as_ref().unwrap();
        assert_eq!(value.text, "style");
        // `style` starts at col 14.
        assert_eq!(value.span, Span::from_parts(1, 14, 1, 18));
    }

    #[test]
    fn v_if_folds_into_single_branch_group() {
        let root = parse_template("<div v-if=\"cond\">a</div>");
        let Node::If(group) = &root_children(&root)[0] else {
            panic!("expected if group");
        };
        assert_eq!(group.branches.len(), 1);
        let Node::IfBranch(branch) = &group.branches[0] else {
            panic!("expected branch");
        };
        assert_eq!(branch.condition.as_ref().unwrap().text, "cond");
        assert_eq!(branch.children.len(), 1);
    }

    #[test]
    fn full_conditional_chain_folds_into_three_branches() {
        let template = "<a v-if=\"x\">1</a>\n<b v-else-if=\"y\">2</b>\n<c v-else>3</c>";
        let root = parse_template(template);
        let children = root_children(&root);
        assert_eq!(children.len(), 1);
        let Node::If(group) = &children[0] else {
            panic!("expected if group");
        };
        assert_eq!(group.branches.len(), 3);
        let Node::IfBranch(last) = &group.branches[2] else {
            panic!("expected branch");
        };
        assert!(last.condition.is_none());
        // Group spans the whole chain.
        assert_eq!(group.span.start.line, 1);
        assert_eq!(group.span.end.line, 3);
    }

    #[test]
    fn consecutive_conditionals_stay_separate() {
        let template = "<a v-if=\"x\">1</a>\n<b v-if=\"y\">2</b>";
        let root = parse_template(template);
        let children = root_children(&root);
        assert_eq!(children.len(), 2);
        assert!(matches!(children[0], Node::If(_)));
        assert!(matches!(children[1], Node::If(_)));
    }

    #[test]
    fn v_for_wraps_element() {
        let root = parse_template("<li v-for=\"item in items\">{{ item }}</li>");
        let Node::For(repeat) = &root_children(&root)[0] else {
            panic!("expected for node");
        };
        assert_eq!(repeat.expression.as_ref().unwrap().text, "item in items");
        assert_eq!(repeat.children.len(), 1);
        assert_eq!(repeat.span, repeat.children[0].span());
    }

    #[test]
    fn mixed_text_becomes_compound() {
        let root = parse_template("<div>count is {{ count }}</div>");
        let Node::Element(el) = &root_children(&root)[0] else {
            panic!("expected element");
        };
        let Node::TextCall(tc) = &el.children[0] else {
            panic!("expected text-call");
        };
        let Node::Compound(compound) = tc.content.as_ref() else {
            panic!("expected compound");
        };
        assert_eq!(compound.children.len(), 2);
    }

    #[test]
    fn whitespace_only_text_is_dropped() {
        let root = parse_template("\n  <div>a</div>\n  ");
        let children = root_children(&root);
        assert_eq!(children.len(), 1);
        assert!(matches!(children[0], Node::Element(_)));
    }

    #[test]
    fn self_closing_and_void_elements() {
        let root = parse_template("<img src=\"x\"/><br><div>a</div>");
        let children = root_children(&root);
        assert_eq!(children.len(), 3);
        let Node::Element(img) = &children[0] else {
            panic!("expected element");
        };
        assert!(img.self_closing);
        let Node::Element(br) = &children[1] else {
            panic!("expected element");
        };
        assert!(br.self_closing);
        assert!(br.children.is_empty());
    }

    #[test]
    fn comment_node() {
        let root = parse_template("<!-- note --><div>a</div>");
        let children = root_children(&root);
        let Node::Comment(comment) = &children[0] else {
            panic!("expected comment");
        };
        assert_eq!(comment.content, " note ");
        assert_eq!(comment.span, Span::from_parts(1, 1, 1, 13));
    }

    #[test]
    fn nested_elements_and_spans_contain_children() {
        let root = parse_template("<div>\n  <span>{{ x }}</span>\n</div>");
        let Node::Element(div) = &root_children(&root)[0] else {
            panic!("expected element");
        };
        let Node::Element(span) = &div.children[0] else {
            panic!("expected span element");
        };
        assert!(div.span.contains(span.span.start));
        assert!(div.span.contains(span.span.end));
    }

    #[test]
    fn unclosed_element_ends_at_eof() {
        let root = parse_template("<div>text");
        let Node::Element(el) = &root_children(&root)[0] else {
            panic!("expected element");
        };
        assert_eq!(el.span.end, LineCol::new(1, 9));
    }

    #[test]
    fn multiline_open_tag() {
        let root = parse_template("<div\n  id=\"a\"\n  :class=\"b\"\n>x</div>");
        let Node::Element(el) = &root_children(&root)[0] else {
            panic!("expected element");
        };
        assert_eq!(el.attributes.len(), 2);
        assert_eq!(el.span.start, LineCol::new(1, 1));
        assert_eq!(el.span.end.line, 4);
    }
}
