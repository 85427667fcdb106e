use habla_markdown::ensure_block_spacing;

fn assert_spaced(input: &str, expected: &str) {
    assert_eq!(ensure_block_spacing(input), expected, "input: {input:?}");
}

fn assert_unchanged(input: &str) {
    assert_spaced(input, input);
}

#[test]
fn blockquote_followed_by_paragraph() {
    assert_spaced(
        "> This is a quote\nThis paragraph should not be sucked in",
        "> This is a quote\n\nThis paragraph should not be sucked in",
    );
}

#[test]
fn multi_line_blockquote_is_kept_together() {
    assert_spaced(
        "> Line 1 of quote\n> Line 2 of quote\n> Line 3 of quote\nAfter",
        "> Line 1 of quote\n> Line 2 of quote\n> Line 3 of quote\n\nAfter",
    );
}

#[test]
fn nested_blockquote() {
    assert_spaced(
        "> Outer quote\n> > Nested quote\nNext paragraph",
        "> Outer quote\n> > Nested quote\n\nNext paragraph",
    );
}

#[test]
fn blockquote_already_spaced_or_at_end() {
    assert_unchanged("> This is a quote\n\nThis paragraph is already separated");
    assert_unchanged("> This is a quote at the end");
}

#[test]
fn code_block_followed_by_paragraph() {
    assert_spaced(
        "```javascript\nconst x = 1;\n```\nThis paragraph should not be sucked in",
        "```javascript\nconst x = 1;\n```\n\nThis paragraph should not be sucked in",
    );
}

#[test]
fn code_block_followed_by_heading() {
    assert_spaced(
        "```\ncode\n```\n## Next Section",
        "```\ncode\n```\n\n## Next Section",
    );
}

#[test]
fn code_block_already_spaced_or_at_end() {
    assert_unchanged("```javascript\nconst x = 1;\n```\n\nAlready separated");
    assert_unchanged("```javascript\nconst x = 1;\n```");
}

#[test]
fn unordered_lists() {
    for marker in ["-", "*", "+"] {
        assert_spaced(
            &format!("{marker} Item 1\n{marker} Item 2\nNext paragraph"),
            &format!("{marker} Item 1\n{marker} Item 2\n\nNext paragraph"),
        );
    }
}

#[test]
fn ordered_lists() {
    assert_spaced(
        "1. First item\n2. Second item\n3. Third item\nAfter",
        "1. First item\n2. Second item\n3. Third item\n\nAfter",
    );
    assert_spaced(
        "10. Tenth item\n11. Eleventh item\nNext paragraph",
        "10. Tenth item\n11. Eleventh item\n\nNext paragraph",
    );
}

#[test]
fn list_already_spaced_or_at_end() {
    assert_unchanged("- Item 1\n- Item 2\n\nAlready separated");
    assert_unchanged("- Item 1\n- Item 2");
}

#[test]
fn indented_continuation_stays_in_the_list() {
    assert_unchanged("- Parent item\n  - Child item 1\n  - Child item 2\n- Another parent");
    assert_unchanged("- first\n  second paragraph of first");
}

#[test]
fn horizontal_rules() {
    for rule in ["---", "***", "___"] {
        assert_spaced(
            &format!("Some text\n{rule}\nAfter"),
            &format!("Some text\n{rule}\n\nAfter"),
        );
    }
    assert_unchanged("Some text\n---\n\nAlready separated");
    assert_unchanged("Some text\n---");
}

#[test]
fn headings() {
    assert_spaced("# Main Title\nBody", "# Main Title\n\nBody");
    assert_spaced("## Section Title\nBody", "## Section Title\n\nBody");
    assert_spaced("###### Small Heading\nBody", "###### Small Heading\n\nBody");
    assert_unchanged("# Main Title\n\nAlready separated");
    assert_unchanged("# Final Heading");
}

#[test]
fn consecutive_headings() {
    assert_spaced(
        "# Main Title\n## Subtitle\nContent here",
        "# Main Title\n\n## Subtitle\n\nContent here",
    );
}

#[test]
fn seven_hashes_is_not_a_heading() {
    assert_unchanged("####### Too deep\nBody");
    assert_unchanged("#hashtag\nBody");
}

#[test]
fn images() {
    assert_spaced(
        "![Cover image](https://example.com/image.jpg)\n## Next Section",
        "![Cover image](https://example.com/image.jpg)\n\n## Next Section",
    );
    assert_spaced(
        "![Photo](https://example.com/photo.png)\nThis is the caption text.",
        "![Photo](https://example.com/photo.png)\n\nThis is the caption text.",
    );
    assert_unchanged("![Photo](https://example.com/photo.png)\n\nAlready separated.");
    assert_unchanged("Some text.\n\n![Final image](https://example.com/end.jpg)");
}

#[test]
fn consecutive_images() {
    assert_spaced(
        "![Image 1](https://example.com/1.jpg)\n![Image 2](https://example.com/2.jpg)\n![Image 3](https://example.com/3.jpg)\nCaption for gallery.",
        "![Image 1](https://example.com/1.jpg)\n\n![Image 2](https://example.com/2.jpg)\n\n![Image 3](https://example.com/3.jpg)\n\nCaption for gallery.",
    );
}

#[test]
fn image_alt_with_brackets() {
    assert_spaced(
        "![A complex [alt] text with (parens) and special chars!](https://example.com/img.jpg)\nNext paragraph.",
        "![A complex [alt] text with (parens) and special chars!](https://example.com/img.jpg)\n\nNext paragraph.",
    );
}

#[test]
fn mixed_blocks() {
    assert_spaced(
        "# Article Title\nIntroduction paragraph.\n> A blockquote\nAnother paragraph.\n- List item 1\n- List item 2\nFinal paragraph.",
        "# Article Title\n\nIntroduction paragraph.\n> A blockquote\n\nAnother paragraph.\n- List item 1\n- List item 2\n\nFinal paragraph.",
    );
}

#[test]
fn document_with_every_construct() {
    assert_spaced(
        "# Main Title\nIntroduction.\n## Code Section\n```javascript\nconst x = 1;\n```\nSome explanation.\n> Important note\nConclusion.\n---\nFooter text.",
        "# Main Title\n\nIntroduction.\n## Code Section\n\n```javascript\nconst x = 1;\n```\n\nSome explanation.\n> Important note\n\nConclusion.\n---\n\nFooter text.",
    );
}

#[test]
fn images_between_headings() {
    assert_spaced(
        "# Article Title\n![Hero](https://example.com/hero.jpg)\n## Introduction\nSome intro text.\n![Diagram](https://example.com/diagram.png)\nExplanation of diagram.",
        "# Article Title\n\n![Hero](https://example.com/hero.jpg)\n\n## Introduction\n\nSome intro text.\n![Diagram](https://example.com/diagram.png)\n\nExplanation of diagram.",
    );
}

#[test]
fn well_formed_document_is_unchanged() {
    assert_unchanged(
        "# Title\n\nFirst paragraph.\n\n> A quote\n\nSecond paragraph.\n\n- Item 1\n- Item 2\n\nThird paragraph.",
    );
}

#[test]
fn text_that_only_looks_like_blocks() {
    assert_unchanged("");
    assert_unchanged("Just a simple paragraph.");
    assert_unchanged("# Title\n\n\nParagraph with extra spacing.");
    assert_unchanged("Use `const` for constants.");
    assert_unchanged("**Bold text** and *italic text*.\nNext paragraph.");
    assert_unchanged("The score was 3---2.\nNext paragraph.");
}

#[test]
fn bare_markers_are_not_blocks() {
    let cases = [
        ("- \nnext\nafter", "- \nnext\nafter"),
        ("-\nnext", "-\nnext"),
        ("1.\nnext", "1.\nnext"),
        ("* \t\nnext", "* \t\nnext"),
        ("#\nfoo\nbar", "#\nfoo\nbar"),
        ("## \nfoo\nbar", "## \nfoo\nbar"),
        ("#\n\nfoo\nbar", "#\n\nfoo\nbar"),
    ];
    for (input, expected) in cases {
        assert_spaced(input, expected);
    }
}

#[test]
fn bare_marker_does_not_hide_the_next_block() {
    assert_spaced("- \n# Title\nBody", "- \n# Title\n\nBody");
    assert_spaced("#\n- item\nafter", "#\n- item\n\nafter");
}
