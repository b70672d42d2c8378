//! Parser behaviour tests.
//!
//! Every fixture is also run through the coverage/ordering invariants.


use pretty_assertions::assert_eq;
use rstest::rstest;
use xi_rope::Rope;

use crate::parsing::{
    blocks::{Block, BlockKind},
    parse, parse_document, plan_title,
};

fn parse_checked(md: &str) -> Vec<Block> {
    let doc = parse_document(Rope::from(md));
    invariants::check(&doc);
    doc.blocks
}

fn kinds(blocks: &[Block]) -> Vec<BlockKind> {
    blocks.iter().map(|b| b.kind).collect()
}

#[test]
fn heading_then_paragraph() {
    let blocks = parse_checked("# Title\n\nBody");

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].kind, BlockKind::Heading);
    assert_eq!(blocks[0].level, Some(1));
    assert_eq!(blocks[0].content, "Title");
    assert_eq!(blocks[1].kind, BlockKind::Paragraph);
    assert_eq!(blocks[1].content, "Body");
    assert_eq!(blocks[1].start_line, 3);
}

#[rstest]
#[case::space("# \n\nBody", 1)]
#[case::tab("##\t\n\nBody", 2)]
#[case::indented("  ### \n\nBody", 3)]
fn marker_with_only_whitespace_is_empty_heading(#[case] md: &str, #[case] level: usize) {
    let blocks = parse_checked(md);

    assert_eq!(kinds(&blocks), vec![BlockKind::Heading, BlockKind::Paragraph]);
    assert_eq!(blocks[0].level, Some(level));
    assert_eq!(blocks[0].content, "");
    assert_eq!(blocks[1].content, "Body");
}

#[test]
fn code_fence_extraction() {
    let blocks = parse_checked("```ts\nconst x=1\n```");

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Code);
    assert_eq!(blocks[0].language.as_deref(), Some("ts"));
    assert_eq!(blocks[0].content, "const x=1");
}

#[test]
fn unterminated_fence_runs_to_end() {
    let blocks = parse_checked("```\n# not a heading\n- nor a list");

    assert_eq!(kinds(&blocks), vec![BlockKind::Code]);
    assert_eq!(blocks[0].language, None);
    assert_eq!(blocks[0].content, "# not a heading\n- nor a list");
}

#[test]
fn checkbox_items() {
    let blocks = parse_checked("- [x] done\n- [ ] todo");

    assert_eq!(blocks.len(), 2);
    assert!(blocks.iter().all(|b| b.kind == BlockKind::ListItem));
    assert!(blocks.iter().all(|b| b.level == Some(0)));
    assert_eq!(blocks[0].checked, Some(true));
    assert_eq!(blocks[0].content, "done");
    assert_eq!(blocks[1].checked, Some(false));
    assert_eq!(blocks[1].content, "todo");
}

#[test]
fn nested_list_levels() {
    let blocks = parse_checked("- top\n  - child\n    - grandchild\n1. numbered");
    let levels: Vec<_> = blocks.iter().map(|b| b.level).collect();

    assert_eq!(levels, vec![Some(0), Some(1), Some(2), Some(0)]);
    assert_eq!(blocks[3].checked, None);
}

#[test]
fn consecutive_quotes_stay_separate() {
    let blocks = parse_checked("> first\n> second");

    assert_eq!(kinds(&blocks), vec![BlockKind::Blockquote, BlockKind::Blockquote]);
    assert_eq!(blocks[0].content, "first");
    assert_eq!(blocks[1].content, "second");
}

#[test]
fn table_collects_contiguous_rows() {
    let md = "| a | b |\n|---|---|\n| 1 | 2 |\nafter";
    let blocks = parse_checked(md);

    assert_eq!(kinds(&blocks), vec![BlockKind::Table, BlockKind::Paragraph]);
    assert_eq!(blocks[0].content, "| a | b |\n|---|---|\n| 1 | 2 |");
    assert_eq!(blocks[1].start_line, 4);
}

#[test]
fn paragraph_lines_join_and_close_on_opener() {
    let blocks = parse_checked("line one\nline two\n## Next");

    assert_eq!(kinds(&blocks), vec![BlockKind::Paragraph, BlockKind::Heading]);
    assert_eq!(blocks[0].content, "line one\nline two");
    assert_eq!(blocks[0].start_line, 1);
    assert_eq!(blocks[1].level, Some(2));
}

#[test]
fn ids_and_order() {
    let blocks = parse_checked("# A\n\ntext\n\n---\n\n> q");
    let ids: Vec<_> = blocks.iter().map(|b| b.id.as_str()).collect();
    let orders: Vec<_> = blocks.iter().map(|b| b.order).collect();

    assert_eq!(ids, vec!["block-0", "block-1", "block-2", "block-3"]);
    assert_eq!(orders, vec![1, 2, 3, 4]);
    assert_eq!(blocks[2].kind, BlockKind::Hr);
    assert_eq!(blocks[2].content, "");
}

#[rstest]
#[case::empty("")]
#[case::blank_lines("\n\n\n")]
#[case::whitespace("   \n\t\n")]
fn no_blocks_for_blank_input(#[case] md: &str) {
    assert!(parse_checked(md).is_empty());
}

#[rstest]
#[case::plain("# Plan\n\nSome words.\n\n- [ ] step\n\n```sh\nmake\n```\n")]
#[case::crlf("# Plan\r\n\r\nBody\r\n")]
#[case::garbage("#####\n|\n>\n```\n")]
#[case::unicode("## Überblick\n\nÄnderungen — 変更\n")]
fn parse_is_deterministic(#[case] md: &str) {
    assert_eq!(parse_checked(md), parse(md));
}

#[test]
fn crlf_is_not_part_of_content() {
    let blocks = parse_checked("# Plan\r\n\r\nBody\r\n");
    assert_eq!(blocks[0].content, "Plan");
    assert_eq!(blocks[1].content, "Body");
}

#[test]
fn source_of_block_round_trips() {
    let doc = parse_document(Rope::from("intro\n\n```rs\nfn main() {}\n```\n"));
    assert_eq!(doc.source_of(&doc.blocks[1]), "```rs\nfn main() {}\n```\n");
}

#[rstest]
#[case("# Add caching layer\n\nbody", "Add caching layer")]
#[case("\n\n  First line  \nsecond", "First line")]
#[case("", "untitled")]
#[case("###No space", "No space")]
fn title_from_plan(#[case] md: &str, #[case] expected: &str) {
    assert_eq!(plan_title(md), expected);
}
