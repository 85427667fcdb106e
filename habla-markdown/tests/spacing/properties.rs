use habla_markdown::ensure_block_spacing;
use proptest::prelude::*;

/// Lines that exercise every rule, bare markers, plain text and blanks.
fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{0,12}",
        "> [a-z ]{0,8}",
        Just("```".to_string()),
        "```[a-z]{1,6}",
        "[-*+] [a-z]{1,8}",
        "[0-9]{1,3}\\. [a-z]{1,8}",
        "  [-*] [a-z]{1,8}",
        prop_oneof![Just("---"), Just("***"), Just("___")].prop_map(str::to_string),
        "#{1,7} [a-z]{0,8}",
        "(?:[-*+#]|[0-9]{1,2}\\.|#{2,6})[ \t]{0,2}",
        "[ \t]{1,3}",
        "!\\[[a-z ]{0,6}\\]\\(https://x\\.test/[a-z]{1,4}\\.png\\)",
        Just(String::new()),
    ]
}

fn terminator() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        8 => Just("\n"),
        1 => Just("\r\n"),
        1 => Just("\r"),
        1 => Just("\u{2028}"),
    ]
}

fn markdown() -> impl Strategy<Value = String> {
    prop::collection::vec((line(), terminator()), 0..24).prop_map(|lines| {
        lines
            .into_iter()
            .map(|(line, terminator)| format!("{line}{terminator}"))
            .collect()
    })
}

proptest! {
    #[test]
    fn normalizing_twice_changes_nothing(input in markdown()) {
        let once = ensure_block_spacing(&input);
        prop_assert_eq!(ensure_block_spacing(&once), once);
    }

    #[test]
    fn arbitrary_text_is_idempotent(input in any::<String>()) {
        let once = ensure_block_spacing(&input);
        prop_assert_eq!(ensure_block_spacing(&once), once);
    }

    #[test]
    fn only_newlines_are_inserted(input in markdown()) {
        let output = ensure_block_spacing(&input);
        let strip = |s: &str| s.chars().filter(|c| *c != '\n').collect::<String>();
        prop_assert!(output.len() >= input.len());
        prop_assert_eq!(strip(&output), strip(&input));
    }

    #[test]
    fn list_items_are_never_split(
        items in prop::collection::vec("[a-z]{1,10}", 1..8),
        ordered in any::<bool>(),
    ) {
        let list: Vec<String> = items
            .iter()
            .enumerate()
            .map(|(index, item)| if ordered {
                format!("{}. {item}", index + 1)
            } else {
                format!("- {item}")
            })
            .collect();
        let input = format!("{}\nParagraph after.", list.join("\n"));

        prop_assert_eq!(
            ensure_block_spacing(&input),
            format!("{}\n\nParagraph after.", list.join("\n"))
        );
    }
}

proptest! {
    #[test]
    fn bare_marker_lines_are_never_followed_by_an_insertion(
        marker in "(?:[-*+#]|[0-9]{1,2}\\.|#{2,6})[ \t]{0,2}",
        next in "[a-z]{1,8}",
    ) {
        let input = format!("{marker}\n{next}");
        prop_assert_eq!(ensure_block_spacing(&input), input);
    }
}
