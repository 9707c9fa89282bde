// ABOUTME: Diagnostic "Debug Info" box on the product edit screen
// ABOUTME: Dumps every custom field stored on the product being edited

use rstore_core::{html_escape, PostMeta};
use std::fmt::Write;

/// Dump `meta` in the host's variable-dump layout, wrapped in `<pre>`
pub fn render_debug_info(meta: &PostMeta) -> String {
    let mut dump = String::new();
    let _ = writeln!(dump, "array({}) {{", meta.len());
    for (key, values) in meta {
        let _ = writeln!(dump, "  [\"{}\"]=>", key);
        let _ = writeln!(dump, "  array({}) {{", values.len());
        for (index, value) in values.iter().enumerate() {
            let _ = writeln!(dump, "    [{}]=>", index);
            let _ = writeln!(dump, "    string({}) \"{}\"", value.len(), value);
        }
        dump.push_str("  }\n");
    }
    dump.push_str("}\n");

    format!("<pre>{}</pre>", html_escape(&dump))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_debug_info() {
        let meta: PostMeta = [
            ("rstore_id".to_string(), vec!["wordpress-basic".to_string()]),
            ("rstore_listPrice".to_string(), vec!["$4.99".to_string()]),
        ]
        .into();

        assert_eq!(
            render_debug_info(&meta),
            concat!(
                "<pre>array(2) {\n",
                "  [&quot;rstore_id&quot;]=&gt;\n",
                "  array(1) {\n",
                "    [0]=&gt;\n",
                "    string(15) &quot;wordpress-basic&quot;\n",
                "  }\n",
                "  [&quot;rstore_listPrice&quot;]=&gt;\n",
                "  array(1) {\n",
                "    [0]=&gt;\n",
                "    string(5) &quot;$4.99&quot;\n",
                "  }\n",
                "}\n",
                "</pre>"
            )
        );
    }

    #[test]
    fn test_render_empty_meta() {
        assert_eq!(render_debug_info(&PostMeta::new()), "<pre>array(0) {\n}\n</pre>");
    }
}
