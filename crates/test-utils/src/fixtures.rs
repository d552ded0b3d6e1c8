// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures and sample NSQL documents

/// Sample NSQL documents for testing
pub struct NsqlFixtures;

impl NsqlFixtures {
    // ===== Clean documents =====

    /// Terminated statements with a trailing comment
    pub const fn terminated_with_comment() -> &'static str {
        "ASK something; >> comment\nTELL something2;"
    }

    /// Filtered FIND query
    pub const fn filtered_find() -> &'static str {
        "FIND users FROM accounts WHERE age > 21;"
    }

    /// Statement ended with PLEASE
    pub const fn polite_show() -> &'static str {
        "SHOW all orders PLEASE"
    }

    /// Several statements, comments and blank lines
    pub const fn mixed_document() -> &'static str {
        ">> Monthly report\n\
         FIND orders FROM sales WHERE total > 100;\n\
         \n\
         TELL ADD \"audit\" TO log;\n\
         GET balance FOR account 42 PLEASE"
    }

    // ===== Documents with findings =====

    /// Unterminated FIND without a filter
    pub const fn unfiltered_find() -> &'static str {
        "FIND users FROM accounts"
    }

    /// Unterminated statement with an unclosed string
    pub const fn unclosed_string() -> &'static str {
        "TELL ADD \"unterminated"
    }

    /// Two-line document used with parser reports on line 2
    pub const fn two_lines() -> &'static str {
        "ASK a;\nTELL ADD thing;"
    }

    // ===== Parser output =====

    /// Parser report with one error on line 2, columns 5..8 (1-based)
    pub const fn parser_error_report() -> &'static str {
        r#"[{"line":2,"column":5,"length":3,"severity":"error","message":"bad token"}]"#
    }

    /// Empty parser report
    pub const fn parser_clean_report() -> &'static str {
        "[]"
    }
}
