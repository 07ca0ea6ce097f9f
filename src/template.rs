// src/template.rs
//
// Head/body skeletons for the reader page and the `{{name}}` substitution
// that fills them in.

use crate::api::{ChapterEntry, ChapterNeighbors, ChapterPages, SeriesMeta};
use crate::reader_config::ReaderOption;
use std::collections::BTreeMap;

pub type Substitutions = BTreeMap<&'static str, String>;

pub const HEAD: &str = concat!(
    r#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8"/>"#,
    r#"<title>{{comic_name}}{{chapter_name}}-{{comic_name}}漫画-动漫之家漫画网</title>"#,
    r#"<link href="/css/uploadstyle.css" type="text/css" rel="stylesheet"/>"#,
    r#"<link href="/css/base.css" rel="stylesheet" type="text/css"/>"#,
    r#"<link href="/css/display2010.css?tt=201309131753" rel="stylesheet" type="text/css"/>"#,
    r#"<style>html, body, div, h1, h2, h3, h4, h5, h6, p, form, ul, li, dl, dt, dd, ol, table { font-family: "微软雅黑" }"#,
    r#".filterimg { -webkit-filter: grayscale(100%); filter: grayscale(100%); }"#,
    r#".fitwidth { max-width: calc(100vw - 4px); height: auto; }</style>"#,
);

/// Title bar shown above the reader. The interactive parts (toolbar, pages,
/// end-of-chapter prompt) are components and are not part of the skeleton.
pub const BODY: &str = concat!(
    r#"<div class="reader-chrome" data-comic="{{comic_id}}" data-chapter="{{chapter_id}}">"#,
    r#"<div class="display_graybg">"#,
    r#"<div class="display_left">{{prev_chapter}}</div>"#,
    r#"<div class="display_middle"><h1 class="hotrmtexth1">"#,
    r#"<a href="/{{comic_url}}/" title="{{comic_name}}" class="redhotl">{{comic_name}}</a></h1>"#,
    r#"<span class="redhotl">{{chapter_name}}</span></div>"#,
    r#"<div class="display_right">{{next_chapter}}</div>"#,
    r#"</div><div class="clearfix"></div></div>"#,
);

/// Replaces every `{{name}}` that has an entry in `substitutions`.
///
/// Unknown placeholders are kept verbatim so that producers owning disjoint
/// sets of names can fill the same skeleton one after another. Substituted
/// values are not scanned again.
pub fn render(skeleton: &str, substitutions: &Substitutions) -> String {
    let mut out = String::with_capacity(skeleton.len());
    let mut rest = skeleton;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                match substitutions.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Names owned by the series payload.
pub fn series_substitutions(
    series: &SeriesMeta,
    neighbors: &ChapterNeighbors,
    option: &ReaderOption,
) -> Substitutions {
    let mut subs = Substitutions::new();
    subs.insert("comic_name", escape_html(&series.title));
    subs.insert(
        "prev_chapter",
        chapter_link("上一话：", "prev_chapter", neighbors.prev.as_ref(), option),
    );
    subs.insert(
        "next_chapter",
        chapter_link("下一话：", "next_chapter", neighbors.next.as_ref(), option),
    );
    subs
}

/// Names owned by the chapter payload and the location.
pub fn chapter_substitutions(chapter: &ChapterPages, option: &ReaderOption) -> Substitutions {
    let mut subs = Substitutions::new();
    subs.insert("chapter_name", escape_html(&chapter.title));
    subs.insert("comic_id", option.comic_id.to_string());
    subs.insert("chapter_id", option.chapter_id.to_string());
    subs.insert("comic_url", escape_html(&option.comic_url));
    subs
}

fn chapter_link(
    label: &str,
    id: &str,
    entry: Option<&ChapterEntry>,
    option: &ReaderOption,
) -> String {
    match entry {
        Some(entry) => format!(
            r#"{}<a id="{}" href="{}">第{}</a>"#,
            label,
            id,
            escape_html(&option.chapter_url(entry.chapter_id)),
            escape_html(&entry.chapter_title)
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(pairs: &[(&'static str, &str)]) -> Substitutions {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_render_replaces_all_occurrences() {
        let out = render("{{a}}-{{b}}-{{a}}", &subs(&[("a", "1"), ("b", "2")]));
        assert_eq!(out, "1-2-1");
    }

    #[test]
    fn test_render_keeps_unknown_placeholders() {
        let out = render("<t>{{a}}{{missing}}</t>", &subs(&[("a", "x")]));
        assert_eq!(out, "<t>x{{missing}}</t>");
    }

    #[test]
    fn test_render_unterminated_marker() {
        let out = render("a {{b", &subs(&[("b", "x")]));
        assert_eq!(out, "a {{b");
    }

    #[test]
    fn test_render_idempotent() {
        let map = subs(&[("comic_name", "X"), ("chapter_name", "Y")]);
        let once = render(HEAD, &map);
        assert_eq!(render(&once, &map), once);
        assert!(!once.contains("{{comic_name}}"));
    }

    #[test]
    fn test_disjoint_maps_compose() {
        let series = subs(&[("comic_name", "妖神记"), ("prev_chapter", "P"), ("next_chapter", "N")]);
        let chapter = subs(&[
            ("chapter_name", "第1话"),
            ("comic_url", "yaoshenji"),
            ("comic_id", "1"),
            ("chapter_id", "2"),
        ]);
        let mut combined = series.clone();
        combined.extend(chapter.clone());

        for skeleton in [HEAD, BODY] {
            let one_then_other = render(&render(skeleton, &series), &chapter);
            let other_then_one = render(&render(skeleton, &chapter), &series);
            let at_once = render(skeleton, &combined);
            assert_eq!(one_then_other, at_once);
            assert_eq!(other_then_one, at_once);
            assert!(!at_once.contains("{{"));
        }
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let out = render("{{a}}", &subs(&[("a", "{{b}}"), ("b", "no")]));
        assert_eq!(out, "{{b}}");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_series_substitutions() {
        let option = ReaderOption::new(12, 102, "abc");
        let series = SeriesMeta {
            title: "A&B".to_string(),
            chapters: Vec::new(),
        };
        let neighbors = ChapterNeighbors {
            prev: Some(ChapterEntry {
                chapter_id: 101,
                chapter_title: "1话".to_string(),
            }),
            next: None,
        };
        let subs = series_substitutions(&series, &neighbors, &option);
        assert_eq!(subs["comic_name"], "A&amp;B");
        assert_eq!(
            subs["prev_chapter"],
            r#"上一话：<a id="prev_chapter" href="/abc/101.shtml?cid=12">第1话</a>"#
        );
        assert_eq!(subs["next_chapter"], "");
    }
}
