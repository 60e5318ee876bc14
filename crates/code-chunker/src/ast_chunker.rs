use crate::config::ChunkerConfig;
use crate::lines::{ChunkSink, Oversize, SourceLines};
use crate::types::ChunkResult;
use tree_sitter::{Node, Tree};

/// How many levels below a top-level node `split_node` descends before it
/// falls back to fixed line windows.
pub const MAX_RECURSIVE_DEPTH: usize = 3;

/// Split `content` along the syntax tree.
///
/// Top-level nodes are packed into groups of up to `chunk_size` bytes. A node
/// that would not fit under `max_chunk_size` even on its own is split along
/// its children instead. Comments stay with the node that follows them.
/// Every non-blank line lands in exactly one chunk.
#[must_use]
pub fn chunk_by_ast(tree: &Tree, content: &str, config: &ChunkerConfig) -> Vec<ChunkResult> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    let lines = SourceLines::new(content);
    let mut splitter = AstSplitter {
        sink: ChunkSink::new(&lines, config.limits(), Oversize::FixedSplit),
    };

    let root = tree.root_node();
    let last = lines.len() - 1;
    if root.named_child_count() == 0 {
        splitter.sink.emit(0, last);
    } else {
        splitter.chunk_top_level(root, last);
    }

    splitter.sink.finish()
}

/// Top-level nodes collected so far, plus where its trailing run of comment
/// nodes begins.
struct Group {
    start: usize,
    end: usize,
    comment_start: Option<usize>,
}

struct AstSplitter<'s, 'a> {
    sink: ChunkSink<'s, 'a>,
}

impl AstSplitter<'_, '_> {
    fn chunk_top_level(&mut self, root: Node<'_>, last: usize) {
        let lines = self.sink.lines();
        let limits = self.sink.limits();
        let mut flushed_to = 0usize;
        let mut group: Option<Group> = None;

        let mut cursor = root.walk();
        let children: Vec<_> = root.named_children(&mut cursor).collect();

        for node in children {
            let next_free = group.as_ref().map_or(flushed_to, |g| g.end + 1);
            let Some((start, end)) = clamp_rows(node, next_free, last) else {
                continue;
            };
            let comment = is_comment(node);

            if lines.text_len(next_free, end) > limits.max_chunk_size {
                let mut split_start = start;
                match group.take() {
                    Some(Group {
                        start: g_start,
                        comment_start: Some(c),
                        ..
                    }) => {
                        if c > g_start {
                            self.sink.emit(g_start, c - 1);
                        }
                        split_start = c;
                    }
                    Some(g) => self.sink.emit(g.start, start - 1),
                    None if start > next_free => self.sink.emit(next_free, start - 1),
                    None => {}
                }
                self.split_node(node, split_start, end, 0);
                flushed_to = end + 1;
                continue;
            }

            if let Some(g) = group.as_mut() {
                let only_comments = g.comment_start == Some(g.start);
                if !comment && !only_comments && lines.text_len(g.start, end) > limits.chunk_size {
                    let cut = g
                        .comment_start
                        .filter(|&c| c > g.start)
                        .unwrap_or(g.end + 1);
                    self.sink.emit(g.start, cut - 1);
                    *g = Group {
                        start: cut,
                        end,
                        comment_start: None,
                    };
                } else {
                    g.end = end;
                    if comment {
                        g.comment_start.get_or_insert(start);
                    } else {
                        g.comment_start = None;
                    }
                }
            } else {
                group = Some(Group {
                    start: next_free,
                    end,
                    comment_start: comment.then_some(start),
                });
            }
        }

        match group {
            Some(g) => self.sink.emit(g.start, last),
            None if flushed_to <= last => self.sink.emit(flushed_to, last),
            None => {}
        }
    }

    /// Emit lines `start..=end` of `node`, descending into its named children
    /// while the range is still over `max_chunk_size`.
    fn split_node(&mut self, node: Node<'_>, start: usize, end: usize, depth: usize) {
        let lines = self.sink.lines();
        if lines.text_len(start, end) <= self.sink.limits().max_chunk_size {
            self.sink.emit(start, end);
            return;
        }

        if depth >= MAX_RECURSIVE_DEPTH || node.named_child_count() == 0 {
            log::debug!(
                "Fixed split of {} at lines {start}..={end} (depth {depth})",
                node.kind()
            );
            self.sink.fixed_split(start, end);
            return;
        }

        let mut pos = start;
        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        for child in children {
            if pos > end {
                break;
            }
            let Some((_, child_end)) = clamp_rows(child, pos, end) else {
                continue;
            };
            // lines before a child (comments, headers) lead that child
            self.split_node(child, pos, child_end, depth + 1);
            pos = child_end + 1;
        }

        if pos <= end {
            self.sink.emit(pos, end);
        }
    }
}

/// Line range of `node`, ignoring an end position at column 0 of the next line
fn node_rows(node: Node<'_>) -> (usize, usize) {
    let start = node.start_position().row;
    let end_pos = node.end_position();
    let end = if end_pos.column == 0 && end_pos.row > start {
        end_pos.row - 1
    } else {
        end_pos.row
    };
    (start, end)
}

/// Node rows restricted to `from..=last`; `None` when nothing is left
fn clamp_rows(node: Node<'_>, from: usize, last: usize) -> Option<(usize, usize)> {
    let (start, end) = node_rows(node);
    let start = start.max(from);
    let end = end.min(last);
    (start <= end).then_some((start, end))
}

fn is_comment(node: Node<'_>) -> bool {
    node.kind().contains("comment")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use pretty_assertions::assert_eq;

    fn parse(lang: Language, code: &str) -> Tree {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&lang.tree_sitter_language()).unwrap();
        parser.parse(code, None).unwrap()
    }

    fn ranges(chunks: &[ChunkResult]) -> Vec<(u32, u32)> {
        chunks.iter().map(|c| (c.start_line, c.end_line)).collect()
    }

    const TWO_FNS: &str =
        "// first\nfn a() {\n    let x = 1;\n}\n\n/// Docs for b.\nfn b() {\n    let y = 2;\n}";

    #[test]
    fn test_small_file_is_one_chunk() {
        let tree = parse(Language::Rust, TWO_FNS);
        let chunks = chunk_by_ast(&tree, TWO_FNS, &ChunkerConfig::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, TWO_FNS);
        assert_eq!(ranges(&chunks), vec![(0, 8)]);
    }

    #[test]
    fn test_comments_stay_with_following_node() {
        let tree = parse(Language::Rust, TWO_FNS);
        let config = ChunkerConfig {
            chunk_size: 40,
            overlap: 0,
            max_chunk_size: None,
        };
        let chunks = chunk_by_ast(&tree, TWO_FNS, &config);
        assert_eq!(ranges(&chunks), vec![(0, 3), (5, 8)]);
        assert!(chunks[1].content.starts_with("/// Docs for b."));
    }

    #[test]
    fn test_leading_doc_comment_on_first_line_stays_with_node() {
        let mut code = String::from("/// Docs for big.\nfn big() {\n");
        for i in 0..5 {
            code.push_str(&format!("    let v{i} = {i};\n"));
        }
        code.push_str("}\n");

        let tree = parse(Language::Rust, &code);
        let config = ChunkerConfig {
            chunk_size: 40,
            overlap: 0,
            max_chunk_size: Some(400),
        };
        let chunks = chunk_by_ast(&tree, &code, &config);
        assert_eq!(ranges(&chunks), vec![(0, 7)]);
        assert!(chunks[0].content.starts_with("/// Docs for big.\nfn big()"));
    }

    #[test]
    fn test_doc_comment_leads_split_of_oversized_node() {
        let mut code = String::from("fn small() {}\n\n// Builds everything.\nfn big() {\n");
        for i in 0..30 {
            code.push_str(&format!("    let v{i} = {i};\n"));
        }
        code.push_str("}\n");

        let tree = parse(Language::Rust, &code);
        let config = ChunkerConfig {
            chunk_size: 60,
            overlap: 0,
            max_chunk_size: Some(120),
        };
        let chunks = chunk_by_ast(&tree, &code, &config);
        assert_eq!(chunks[0].content, "fn small() {}");
        assert!(chunks[1].content.starts_with("// Builds everything.\nfn big() {"));
        assert!(chunks.iter().all(|c| c.content.len() <= 120));
    }

    #[test]
    fn test_oversized_function_is_split_along_children() {
        let mut code = String::from("fn big() {\n");
        for i in 0..60 {
            code.push_str(&format!("    let v{i} = {i};\n"));
        }
        code.push_str("}\n");

        let tree = parse(Language::Rust, &code);
        let config = ChunkerConfig {
            chunk_size: 100,
            overlap: 0,
            max_chunk_size: Some(300),
        };
        let chunks = chunk_by_ast(&tree, &code, &config);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.content.len() <= 300));
        assert_eq!(chunks.first().unwrap().start_line, 0);
        assert_eq!(chunks.last().unwrap().content, "}");
        for pair in chunks.windows(2) {
            assert!(pair[1].start_line > pair[0].end_line);
        }
    }

    #[test]
    fn test_root_without_named_children() {
        let code = "   \n// only a comment?\n";
        let tree = parse(Language::Python, "\n\n");
        assert_eq!(tree.root_node().named_child_count(), 0);
        let chunks = chunk_by_ast(&tree, code, &ChunkerConfig::default());
        assert_eq!(ranges(&chunks), vec![(1, 1)]);
    }

    #[test]
    fn test_whitespace_input_is_empty() {
        let tree = parse(Language::Rust, " \n\t\n");
        assert!(chunk_by_ast(&tree, " \n\t\n", &ChunkerConfig::default()).is_empty());
        let tree = parse(Language::Rust, "");
        assert!(chunk_by_ast(&tree, "", &ChunkerConfig::default()).is_empty());
    }

    #[test]
    fn test_deep_nesting_respects_depth_cap() {
        let mut code = String::from("function outer() {\n");
        for i in 0..40 {
            code.push_str(&format!("{}if (x{i}) {{\n", "  ".repeat(i + 1)));
        }
        code.push_str(&format!("{}work();\n", "  ".repeat(41)));
        for i in (0..40).rev() {
            code.push_str(&format!("{}}}\n", "  ".repeat(i + 1)));
        }
        code.push_str("}\n");

        let tree = parse(Language::JavaScript, &code);
        let config = ChunkerConfig {
            chunk_size: 200,
            overlap: 0,
            max_chunk_size: None,
        };
        let chunks = chunk_by_ast(&tree, &code, &config);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.content.len() <= 600));
        let covered: usize = chunks.iter().map(|c| c.line_count() as usize).sum();
        assert_eq!(covered, code.lines().count());
    }
}
