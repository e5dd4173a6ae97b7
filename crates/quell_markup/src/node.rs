//! The markup tree as a tagged union over a closed set of node kinds.
//!
//! Every node carries an inclusive line/column [`Span`] relative to the
//! markup region content (line 1 is the first content line). A node's span
//! fully contains the spans of all its children and branches; nodes are
//! owned exclusively by their parent.

use quell_source::Span;

/// A node of the markup tree.
///
/// One variant per node kind, rather than a trait hierarchy: the resolver
/// needs uniform traversal plus per-kind dispatch, which a tagged union
/// gives directly.
#[derive(Clone, Debug)]
pub enum Node {
    /// The document root. Never a placement target.
    Root(Root),
    /// An element with attributes and children.
    Element(Element),
    /// A `{{ expression }}` interpolation.
    Interpolation(Interpolation),
    /// A run of plain text.
    Text(Text),
    /// A `<!-- ... -->` comment.
    Comment(Comment),
    /// An if/else-if/else construct. Its branches are `IfBranch` nodes.
    If(If),
    /// One arm of an [`If`] construct.
    IfBranch(IfBranch),
    /// A repeat construct (`v-for`) wrapping its element.
    For(For),
    /// Adjacent text and interpolation parts merged into one expression.
    Compound(Compound),
    /// A wrapper around a text-producing child of an element.
    TextCall(TextCall),
}

/// The document root.
#[derive(Clone, Debug)]
pub struct Root {
    /// Span covering the whole region content.
    pub span: Span,
    /// Top-level children.
    pub children: Vec<Node>,
}

/// An attribute (or directive) of an element.
#[derive(Clone, Debug)]
pub struct Attribute {
    /// The attribute name as written (e.g. `v-if`, `:class`, `id`).
    pub name: String,
    /// Span covering the attribute from name to closing quote.
    pub span: Span,
    /// The attribute value, if present.
    pub value: Option<Expression>,
}

/// A raw expression with its own location (an attribute value, a branch
/// condition, or a repeat source).
#[derive(Clone, Debug)]
pub struct Expression {
    /// The expression text, unparsed.
    pub text: String,
    /// Span of the expression text (inside quotes for attribute values).
    pub span: Span,
}

/// An element node.
#[derive(Clone, Debug)]
pub struct Element {
    /// The tag name.
    pub tag: String,
    /// Span from the `<` of the open tag to the `>` of the close tag.
    pub span: Span,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// Child nodes, in source order.
    pub children: Vec<Node>,
    /// `true` for `<br/>`-style elements with no close tag.
    pub self_closing: bool,
}

/// A `{{ expression }}` interpolation.
#[derive(Clone, Debug)]
pub struct Interpolation {
    /// Span from the first `{` to the last `}`.
    pub span: Span,
    /// The expression text between the braces, trimmed.
    pub expression: String,
}

/// A run of plain text.
#[derive(Clone, Debug)]
pub struct Text {
    /// Span of the text run.
    pub span: Span,
    /// The text content.
    pub content: String,
}

/// A `<!-- ... -->` comment.
#[derive(Clone, Debug)]
pub struct Comment {
    /// Span from `<!--` to `-->`.
    pub span: Span,
    /// The comment content between the delimiters.
    pub content: String,
}

/// An if/else-if/else construct.
///
/// Branch index 0 is the primary `v-if` arm; indices above 0 are `v-else-if`
/// and `v-else` continuations. Every branch is a [`Node::IfBranch`].
#[derive(Clone, Debug)]
pub struct If {
    /// Span from the start of the first branch to the end of the last.
    pub span: Span,
    /// The branches, in source order.
    pub branches: Vec<Node>,
}

/// One arm of an [`If`] construct.
#[derive(Clone, Debug)]
pub struct IfBranch {
    /// Span of the branch (the span of its controlled element).
    pub span: Span,
    /// The branch condition (`None` for a final `v-else`).
    pub condition: Option<Expression>,
    /// The nodes controlled by this branch.
    pub children: Vec<Node>,
}

/// A repeat construct wrapping its element.
#[derive(Clone, Debug)]
pub struct For {
    /// Span of the construct (the span of its element).
    pub span: Span,
    /// The repeat source expression (`item in items`).
    pub expression: Option<Expression>,
    /// The repeated nodes.
    pub children: Vec<Node>,
}

/// Adjacent text and interpolation parts merged into one expression.
#[derive(Clone, Debug)]
pub struct Compound {
    /// Span covering all parts.
    pub span: Span,
    /// The merged parts, in source order.
    pub children: Vec<Node>,
}

/// A wrapper around a text-producing child of an element.
#[derive(Clone, Debug)]
pub struct TextCall {
    /// Span of the wrapped content.
    pub span: Span,
    /// The wrapped node.
    pub content: Box<Node>,
}

impl Node {
    /// Returns this node's span.
    pub fn span(&self) -> Span {
        match self {
            Node::Root(n) => n.span,
            Node::Element(n) => n.span,
            Node::Interpolation(n) => n.span,
            Node::Text(n) => n.span,
            Node::Comment(n) => n.span,
            Node::If(n) => n.span,
            Node::IfBranch(n) => n.span,
            Node::For(n) => n.span,
            Node::Compound(n) => n.span,
            Node::TextCall(n) => n.span,
        }
    }

    /// Returns this node's structural children (branches excluded; see
    /// [`If::branches`]).
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root(n) => &n.children,
            Node::Element(n) => &n.children,
            Node::IfBranch(n) => &n.children,
            Node::For(n) => &n.children,
            Node::Compound(n) => &n.children,
            _ => &[],
        }
    }

    /// Returns a short name for the node kind, for error output and tests.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Root(_) => "root",
            Node::Element(_) => "element",
            Node::Interpolation(_) => "interpolation",
            Node::Text(_) => "text",
            Node::Comment(_) => "comment",
            Node::If(_) => "if",
            Node::IfBranch(_) => "if-branch",
            Node::For(_) => "for",
            Node::Compound(_) => "compound",
            Node::TextCall(_) => "text-call",
        }
    }
}
