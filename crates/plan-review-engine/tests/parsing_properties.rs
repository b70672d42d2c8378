use plan_review_engine::{Block, BlockKind, parse, plan_title};
use pretty_assertions::assert_eq;

/// Structure without ids, which may differ between parses.
fn shape(blocks: &[Block]) -> Vec<(BlockKind, String, Option<usize>, Option<bool>)> {
    blocks
        .iter()
        .map(|b| (b.kind, b.content.clone(), b.level, b.checked))
        .collect()
}

#[test]
fn parsing_is_deterministic() {
    let md = "# T\n\npara\nmore\n\n- [x] a\n  - b\n\n> q\n> r\n\n| a |\n|---|\n\n```\nx\n";
    assert_eq!(shape(&parse(md)), shape(&parse(md)));
}

#[test]
fn heading_then_paragraph() {
    let blocks = parse("# Title\n\nBody");
    assert_eq!(
        shape(&blocks),
        vec![
            (BlockKind::Heading, "Title".to_string(), Some(1), None),
            (BlockKind::Paragraph, "Body".to_string(), None, None),
        ]
    );
}

#[test]
fn code_fence_is_one_block() {
    let blocks = parse("```ts\nconst x=1\n```");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Code);
    assert_eq!(blocks[0].language.as_deref(), Some("ts"));
    assert_eq!(blocks[0].content, "const x=1");
}

#[test]
fn checkboxes() {
    let blocks = parse("- [x] done\n- [ ] todo");
    assert_eq!(
        shape(&blocks),
        vec![
            (BlockKind::ListItem, "done".to_string(), Some(0), Some(true)),
            (BlockKind::ListItem, "todo".to_string(), Some(0), Some(false)),
        ]
    );
}

#[test]
fn block_json_matches_client_shape() {
    let blocks = parse("- [ ] item");
    let json = serde_json::to_value(&blocks[0]).unwrap();

    assert_eq!(json["type"], "list-item");
    assert_eq!(json["id"], "block-0");
    assert_eq!(json["order"], 1);
    assert_eq!(json["startLine"], 1);
    assert_eq!(json["checked"], false);
}

#[test]
fn title_comes_from_leading_heading() {
    assert_eq!(plan_title("\n\n## Migrate users\n\nbody"), "Migrate users");
}
