// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Hashtags in `body`, without the `#`, first occurrence order, no
/// duplicates (case-insensitive).
pub fn extract_hashtags(body: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for token in body.split_whitespace() {
        for piece in token.split('#').skip(1) {
            let tag: String = piece
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            if tag.is_empty() {
                continue;
            }
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
                tags.push(tag);
            }
        }
    }
    tags
}
