//! Position resolution: finding the smallest node that owns a diagnostic.
//!
//! The resolver walks the tree depth-first, preferring the deepest child
//! that owns the position. Two rules redirect the result upward:
//!
//! - A position inside the condition of an `else`/`else-if` branch resolves
//!   to the enclosing [`If`](crate::node::If) group, so the marker lands at
//!   the top of the whole construct.
//! - A position in the attribute region of the element controlled by an
//!   `else`/`else-if` branch resolves per [`BranchAttributePolicy`].
//!
//! Nothing else ever falls back to an ancestor: a diagnostic that no node
//! owns resolves to `None` and is skipped by the placement policy.

use crate::node::{Element, Node};
use quell_source::LineCol;

/// Where to place a marker for an attribute-region diagnostic on the element
/// controlled by an `else`/`else-if` branch.
///
/// Observed template compilers disagree on the diagnostic column convention
/// here, so the choice is a policy rather than a fixed rule.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BranchAttributePolicy {
    /// Resolve to the enclosing if-group, annotating the whole construct.
    #[default]
    ForwardToGroup,
    /// Resolve to the branch's element itself.
    StayOnElement,
}

/// Options controlling resolution.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolveOptions {
    /// Placement for attribute diagnostics on `else`/`else-if` elements.
    pub branch_attribute_policy: BranchAttributePolicy,
}

/// Resolves the smallest node that owns `pos`, or `None` if no node does.
///
/// `pos` is relative to the markup region content (1-indexed, line 1 is the
/// first content line). The returned reference borrows from `root`; no node
/// is copied or mutated.
pub fn resolve<'a>(root: &'a Node, pos: LineCol, options: &ResolveOptions) -> Option<&'a Node> {
    resolve_in(root, pos, None, options)
}

fn resolve_in<'a>(
    node: &'a Node,
    pos: LineCol,
    enclosing_if: Option<&'a Node>,
    options: &ResolveOptions,
) -> Option<&'a Node> {
    // Children first: the deepest owner wins. In a well-formed tree at most
    // one child owns the position; a later non-null result overrides an
    // earlier one only in degenerate overlapping trees.
    let mut best_child: Option<&'a Node> = None;

    if let Node::If(group) = node {
        for (index, branch) in group.branches.iter().enumerate() {
            // An else/else-if branch remembers its group so condition and
            // attribute hits can be redirected to the construct's top.
            let parent = if index > 0 { Some(node) } else { enclosing_if };
            if let Some(found) = resolve_in(branch, pos, parent, options) {
                best_child = Some(found);
            }
        }
    }

    for child in node.children() {
        if let Some(found) = resolve_in(child, pos, enclosing_if, options) {
            best_child = Some(found);
        }
    }

    if let Node::TextCall(wrapper) = node {
        if let Some(found) = resolve_in(&wrapper.content, pos, enclosing_if, options) {
            best_child = Some(found);
        }
    }

    if let Node::IfBranch(branch) = node {
        // A hit inside the branch condition beats the element child the
        // condition text physically lives in.
        if let Some(condition) = &branch.condition {
            if condition.span.contains(pos) {
                return Some(enclosing_if.unwrap_or(node));
            }
        }

        // Attribute-region hit on the element controlled by an else/else-if
        // branch: policy decides whether the marker annotates the group or
        // the element.
        if let Some(group) = enclosing_if {
            if let Some(first @ Node::Element(element)) = branch.children.first() {
                if in_attribute_region(element, pos) {
                    return Some(match options.branch_attribute_policy {
                        BranchAttributePolicy::ForwardToGroup => group,
                        BranchAttributePolicy::StayOnElement => first,
                    });
                }
            }
        }
    }

    if best_child.is_some() {
        return best_child;
    }

    // No child owns the position. Accept this node only if the position
    // line touches its span: on a boundary line, or strictly between the
    // start and end lines. Rejecting everything else rules out nodes whose
    // spans are non-contiguous with their content.
    let span = node.span();
    if !span.on_boundary_line(pos.line) && !span.line_strictly_inside(pos.line) {
        return None;
    }
    if !span.contains(pos) {
        return None;
    }

    match node {
        Node::Element(element) if in_attribute_region(element, pos) => Some(node),
        // The root is never a placement target: annotating the whole
        // document is always wrong.
        Node::Root(_) => None,
        _ => Some(node),
    }
}

/// Returns `true` if `pos` falls in the attribute region of `element`: the
/// span from the element's start to the start of its first child (or the
/// element's end, if childless).
pub fn in_attribute_region(element: &Element, pos: LineCol) -> bool {
    let span = element.span;

    if span.start.line != span.end.line {
        // Multi-line element.
        if span.line_strictly_inside(pos.line) {
            if let Some(first_child) = element.children.first() {
                return pos < first_child.span().start;
            }
            return true;
        }
        if pos.line == span.start.line {
            return pos.col >= span.start.col;
        }
        // The end line holds the close tag, never attributes.
        return false;
    }

    // Single-line element: the attribute region ends where the first child
    // starts (or at the element's own end).
    let child_start_col = element
        .children
        .first()
        .map(|c| c.span().start.col)
        .unwrap_or(span.end.col);
    pos.line == span.start.line && pos.col >= span.start.col && pos.col < child_start_col
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_template;
    use quell_source::LineCol;

    fn resolve_default(root: &Node, line: u32, col: u32) -> Option<&Node> {
        resolve(root, LineCol::new(line, col), &ResolveOptions::default())
    }

    /// Column of `needle` in `line` of `template`, 1-indexed.
    fn col_of(template: &str, line: u32, needle: &str) -> u32 {
        let text = template.split('\n').nth(line as usize - 1).unwrap();
        text.find(needle).unwrap() as u32 + 1
    }

    #[test]
    fn interpolation_wins_over_enclosing_elements() {
        let template = "\n<div><span>{{ x }}</span></div>\n";
        let root = parse_template(template);
        let col = col_of(template, 2, "x");
        let node = resolve_default(&root, 2, col).unwrap();
        assert_eq!(node.kind_name(), "interpolation");
    }

    #[test]
    fn attribute_hit_returns_element() {
        let template = "\n<div :class=\"style\">text</div>\n";
        let root = parse_template(template);
        let col = col_of(template, 2, "style");
        let node = resolve_default(&root, 2, col).unwrap();
        assert_eq!(node.kind_name(), "element");
    }

    #[test]
    fn text_child_hit_returns_text_not_element() {
        let template = "\n<div :class=\"style\">some text</div>\n";
        let root = parse_template(template);
        let col = col_of(template, 2, "some");
        let node = resolve_default(&root, 2, col).unwrap();
        assert_ne!(node.kind_name(), "element");
        assert!(node.span().contains(LineCol::new(2, col)));
    }

    #[test]
    fn primary_condition_hit_returns_branch() {
        let template = "\n<div v-if=\"cond\">a</div>\n";
        let root = parse_template(template);
        let col = col_of(template, 2, "cond");
        let node = resolve_default(&root, 2, col).unwrap();
        assert_eq!(node.kind_name(), "if-branch");
    }

    #[test]
    fn else_if_condition_forwards_to_group() {
        let template = "\n<div v-if=\"a\">1</div>\n<div v-else-if=\"b\">2</div>\n<div v-else>3</div>\n";
        let root = parse_template(template);
        let col = col_of(template, 3, "b\"") ;
        let node = resolve_default(&root, 3, col).unwrap();
        assert_eq!(node.kind_name(), "if");
        // The group starts at the v-if element, so the marker lands above
        // the whole construct.
        assert_eq!(node.span().start.line, 2);
    }

    #[test]
    fn else_branch_attribute_policy_forwards_by_default() {
        let template = "\n<div v-if=\"a\">1</div>\n<div v-else :class=\"bad\">2</div>\n";
        let root = parse_template(template);
        let col = col_of(template, 3, "bad");
        let node = resolve_default(&root, 3, col).unwrap();
        assert_eq!(node.kind_name(), "if");
    }

    #[test]
    fn else_branch_attribute_policy_stay_on_element() {
        let template = "\n<div v-if=\"a\">1</div>\n<div v-else :class=\"bad\">2</div>\n";
        let root = parse_template(template);
        let col = col_of(template, 3, "bad");
        let options = ResolveOptions {
            branch_attribute_policy: BranchAttributePolicy::StayOnElement,
        };
        let node = resolve(&root, LineCol::new(3, col), &options).unwrap();
        assert_eq!(node.kind_name(), "element");
        assert_eq!(node.span().start.line, 3);
    }

    #[test]
    fn position_outside_any_node_resolves_to_none() {
        let template = "\n<div>a</div>\n";
        let root = parse_template(template);
        assert!(resolve_default(&root, 10, 1).is_none());
    }

    #[test]
    fn root_is_never_returned() {
        // Line 1 of the content is the empty remainder of the template tag
        // line; only the root's span touches it.
        let template = "\n<div>a</div>\n";
        let root = parse_template(template);
        assert!(resolve_default(&root, 1, 1).is_none());
    }

    #[test]
    fn interpolation_in_mixed_text() {
        let template = "\n<div>prefix {{ broken }} suffix</div>\n";
        let root = parse_template(template);
        let col = col_of(template, 2, "broken");
        let node = resolve_default(&root, 2, col).unwrap();
        assert_eq!(node.kind_name(), "interpolation");
        let col = col_of(template, 2, "prefix");
        let node = resolve_default(&root, 2, col).unwrap();
        assert_eq!(node.kind_name(), "text");
    }

    #[test]
    fn multiline_element_attribute_region() {
        let template = "\n<div\n  :class=\"bad\"\n>\n  text\n</div>\n";
        let root = parse_template(template);
        let col = col_of(template, 3, "bad");
        let node = resolve_default(&root, 3, col).unwrap();
        assert_eq!(node.kind_name(), "element");
        assert_eq!(node.span().start.line, 2);
    }

    #[test]
    fn attribute_region_helper_single_line() {
        let template = "\n<img src=\"x\"/>\n";
        let root = parse_template(template);
        let Node::Root(r) = &root else { unreachable!() };
        let Node::Element(el) = &r.children[0] else {
            panic!("expected element, got {}", r.children[0].kind_name())
        };
        assert!(in_attribute_region(el, LineCol::new(2, 6)));
        assert!(!in_attribute_region(el, LineCol::new(3, 1)));
    }
}
