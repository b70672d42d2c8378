// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_plan(sections: usize) -> String {
    let base = "## Step\n\nParagraph with some **bold** content and `code`.\n\n- [ ] Task item\n  - Nested item\n- Another item\n\n> A quoted note\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n---\n\n";
    format!("# Plan\n\n{}", base.repeat(sections))
}
