#[cfg(test)]
mod tests {

    mod description_tests {
        use crate::services::metadata::short_description;

        #[test]
        fn test_short_text_passes_through() {
            assert_eq!(short_description("hello world", 165), "hello world");
        }

        #[test]
        fn test_exact_length_passes_through() {
            let text = "a".repeat(165);
            assert_eq!(short_description(&text, 165), text);
        }

        #[test]
        fn test_long_text_cut_at_word_boundary() {
            let text = "word ".repeat(60);
            let out = short_description(&text, 165);

            assert!(out.ends_with("..."));
            assert!(out.chars().count() <= 168);

            let stripped = &out[..out.len() - 3];
            assert!(text.starts_with(stripped));
            // the cut lands exactly where a space was
            assert_eq!(text.as_bytes()[stripped.len()], b' ');
        }

        #[test]
        fn test_no_space_falls_back_to_hard_cut() {
            let text = "a".repeat(400);
            let out = short_description(&text, 165);
            assert_eq!(out.len(), 168);
            assert_eq!(out, format!("{}...", "a".repeat(165)));
        }

        #[test]
        fn test_leading_space_only_is_hard_cut() {
            // a space at position zero does not count as a word boundary
            let text = format!(" {}", "b".repeat(400));
            let out = short_description(&text, 165);
            assert!(out.ends_with("..."));
            assert_eq!(out.chars().count(), 168);
        }

        #[test]
        fn test_empty_text() {
            assert_eq!(short_description("", 165), "");
        }
    }

    mod pagination_tests {
        use crate::services::pagination::{
            clamp_page, derive_total_pages, window_items, PageItem, MAX_PAGE,
        };

        fn numbers(items: &[PageItem]) -> Vec<usize> {
            items
                .iter()
                .filter_map(|i| match i {
                    PageItem::Page { number, .. } => Some(*number),
                    PageItem::Ellipsis => None,
                })
                .collect()
        }

        fn ellipsis_count(items: &[PageItem]) -> usize {
            items.iter().filter(|i| **i == PageItem::Ellipsis).count()
        }

        #[test]
        fn test_window_small_total_shows_all_pages() {
            let items = window_items(2, 3);
            assert_eq!(numbers(&items), vec![1, 2, 3]);
            assert_eq!(ellipsis_count(&items), 0);
        }

        #[test]
        fn test_window_at_start() {
            let items = window_items(1, 10);
            assert_eq!(numbers(&items), vec![1, 2, 3, 4, 5, 10]);
            assert_eq!(ellipsis_count(&items), 1);
        }

        #[test]
        fn test_window_in_middle() {
            let items = window_items(10, 20);
            assert_eq!(numbers(&items), vec![1, 8, 9, 10, 11, 12, 20]);
            assert_eq!(ellipsis_count(&items), 2);
        }

        #[test]
        fn test_window_at_end() {
            let items = window_items(10, 10);
            assert_eq!(numbers(&items), vec![1, 6, 7, 8, 9, 10]);
            assert_eq!(ellipsis_count(&items), 1);
        }

        #[test]
        fn test_window_marks_current_page() {
            let items = window_items(10, 20);
            let current: Vec<usize> = items
                .iter()
                .filter_map(|i| match i {
                    PageItem::Page {
                        number,
                        current: true,
                    } => Some(*number),
                    _ => None,
                })
                .collect();
            assert_eq!(current, vec![10]);
        }

        #[test]
        fn test_window_invariants_hold_everywhere() {
            for total_pages in 1..=30 {
                for page in 1..=total_pages {
                    let items = window_items(page, total_pages);
                    let nums = numbers(&items);

                    // at most 5 of the in-window buttons plus first/last
                    let windowed = nums
                        .iter()
                        .filter(|n| **n != 1 && **n != total_pages)
                        .count();
                    assert!(windowed <= 5);
                    assert!(nums.iter().all(|n| *n >= 1 && *n <= total_pages));

                    if total_pages > 5 {
                        assert!(nums.contains(&1), "page 1 missing for {page}/{total_pages}");
                        assert!(
                            nums.contains(&total_pages),
                            "last page missing for {page}/{total_pages}"
                        );
                    }

                    // window numbers are strictly increasing
                    assert!(nums.windows(2).all(|w| w[0] < w[1]));
                }
            }
        }

        #[test]
        fn test_window_single_page() {
            let items = window_items(1, 1);
            assert_eq!(numbers(&items), vec![1]);
        }

        #[test]
        fn test_total_from_reported_total() {
            assert_eq!(derive_total_pages(1, 1, 9, Some(28), 9, false), 4);
        }

        #[test]
        fn test_total_with_hero_deduplicated() {
            // 28 posts, one shown as hero: 27 remain for the grid
            assert_eq!(derive_total_pages(1, 1, 9, Some(28), 9, true), 3);
        }

        #[test]
        fn test_total_never_below_one() {
            assert_eq!(derive_total_pages(1, 1, 0, Some(0), 9, true), 1);
            assert_eq!(derive_total_pages(1, 1, 0, Some(1), 9, true), 1);
        }

        #[test]
        fn test_short_first_page_means_single_page() {
            assert_eq!(derive_total_pages(5, 1, 3, None, 9, false), 1);
        }

        #[test]
        fn test_short_later_page_is_the_last() {
            assert_eq!(derive_total_pages(10, 3, 4, None, 9, false), 3);
        }

        #[test]
        fn test_full_page_keeps_previous_estimate() {
            assert_eq!(derive_total_pages(7, 2, 9, None, 9, false), 7);
        }

        #[test]
        fn test_clamp_page_bounds() {
            assert_eq!(clamp_page(0), 1);
            assert_eq!(clamp_page(3), 3);
            assert_eq!(clamp_page(usize::MAX), MAX_PAGE);
        }
    }

    mod tag_tests {
        use crate::services::tags::parse_tags;

        #[test]
        fn test_parse_trims_and_drops_empty() {
            assert_eq!(parse_tags("a, b ,,c"), vec!["a", "b", "c"]);
        }

        #[test]
        fn test_parse_preserves_order_and_duplicates() {
            assert_eq!(parse_tags("rust, web, rust"), vec!["rust", "web", "rust"]);
        }

        #[test]
        fn test_parse_empty_input() {
            assert!(parse_tags("").is_empty());
            assert!(parse_tags(" , ,").is_empty());
        }

        #[test]
        fn test_parse_single_tag() {
            assert_eq!(parse_tags("  tutorial  "), vec!["tutorial"]);
        }
    }

    mod metadata_tests {
        use crate::config::SiteConfig;
        use crate::models::Post;
        use crate::services::metadata::PageMetadata;

        fn site() -> SiteConfig {
            SiteConfig {
                title: "Test Blog".into(),
                url: "https://blog.test.dev/".into(),
                default_author: "Staff Writer".into(),
            }
        }

        fn post() -> Post {
            Post {
                id: "1".into(),
                title: Some("A Fine Post".into()),
                content: "Body text of the post.".into(),
                slug: "a-fine-post".into(),
                tags: vec!["rust".into()],
                created_at: Some("2024-03-01T12:00:00Z".into()),
                created_by: Some("Alice".into()),
                cover_link: Some("https://cdn.test.dev/cover.jpg".into()),
            }
        }

        #[test]
        fn test_full_post_metadata() {
            let meta = PageMetadata::for_post(&post(), &site(), 165);

            assert_eq!(meta.title, "A Fine Post");
            assert_eq!(meta.description, "Body text of the post.");
            assert_eq!(
                meta.canonical.as_deref(),
                Some("https://blog.test.dev/a-fine-post")
            );
            assert_eq!(meta.twitter_card, "summary_large_image");
            assert_eq!(meta.author.as_deref(), Some("Alice"));

            let image = meta.og_image.expect("cover should produce an image");
            assert_eq!(image.url, "https://cdn.test.dev/cover.jpg");
            assert_eq!((image.width, image.height), (1200, 630));
            assert_eq!(image.alt, "A Fine Post");
        }

        #[test]
        fn test_canonical_strips_trailing_slash_only_once() {
            let meta = PageMetadata::for_post(&post(), &site(), 165);
            let canonical = meta.canonical.unwrap();
            assert!(!canonical.contains("//a-fine-post"));
        }

        #[test]
        fn test_no_cover_means_summary_card_and_no_image() {
            let mut p = post();
            p.cover_link = None;
            let meta = PageMetadata::for_post(&p, &site(), 165);
            assert!(meta.og_image.is_none());
            assert_eq!(meta.twitter_card, "summary");
        }

        #[test]
        fn test_empty_cover_string_treated_as_absent() {
            let mut p = post();
            p.cover_link = Some(String::new());
            let meta = PageMetadata::for_post(&p, &site(), 165);
            assert!(meta.og_image.is_none());
        }

        #[test]
        fn test_missing_title_falls_back() {
            let mut p = post();
            p.title = None;
            let meta = PageMetadata::for_post(&p, &site(), 165);
            assert_eq!(meta.title, "Untitled Post");
            assert_eq!(
                meta.og_image.unwrap().alt,
                "Blog post cover image"
            );
        }

        #[test]
        fn test_missing_author_uses_site_default() {
            let mut p = post();
            p.created_by = None;
            let meta = PageMetadata::for_post(&p, &site(), 165);
            assert_eq!(meta.author.as_deref(), Some("Staff Writer"));
        }

        #[test]
        fn test_published_time_is_iso_utc() {
            let meta = PageMetadata::for_post(&post(), &site(), 165);
            assert_eq!(
                meta.published_time.as_deref(),
                Some("2024-03-01T12:00:00.000Z")
            );
        }

        #[test]
        fn test_unparseable_created_at_omits_published_time() {
            let mut p = post();
            p.created_at = Some("not a date".into());
            let meta = PageMetadata::for_post(&p, &site(), 165);
            assert!(meta.published_time.is_none());
        }

        #[test]
        fn test_not_found_fallback() {
            let meta = PageMetadata::not_found();
            assert_eq!(meta.title, "Post Not Found");
            assert_eq!(meta.description, "The requested post could not be found.");
            assert_eq!(meta.twitter_card, "summary");
            assert!(meta.canonical.is_none());
            assert!(meta.og_image.is_none());
        }

        #[test]
        fn test_long_content_trimmed_for_description() {
            let mut p = post();
            p.content = "lorem ipsum ".repeat(50);
            let meta = PageMetadata::for_post(&p, &site(), 165);
            assert!(meta.description.ends_with("..."));
            assert!(meta.description.chars().count() <= 168);
        }
    }

    mod markdown_tests {
        use crate::services::markdown::MarkdownRenderer;

        #[test]
        fn test_render_basic_markdown() {
            let renderer = MarkdownRenderer::new();
            let html = renderer.render("# Hello World");
            assert!(html.contains("<h1>"));
            assert!(html.contains("Hello World"));
        }

        #[test]
        fn test_render_paragraph_and_emphasis() {
            let renderer = MarkdownRenderer::new();
            let html = renderer.render("Some **bold** text");
            assert!(html.contains("<p>"));
            assert!(html.contains("<strong>bold</strong>"));
        }

        #[test]
        fn test_render_table() {
            let renderer = MarkdownRenderer::new();
            let html = renderer.render("| A | B |\n|---|---|\n| 1 | 2 |");
            assert!(html.contains("<table>"));
        }

        #[test]
        fn test_script_is_stripped() {
            let renderer = MarkdownRenderer::new();
            let html = renderer.render("hello <script>alert(1)</script>");
            assert!(!html.contains("<script>"));
        }

        #[test]
        fn test_links_get_rel() {
            let renderer = MarkdownRenderer::new();
            let html = renderer.render("[x](https://example.com)");
            assert!(html.contains("noopener noreferrer"));
        }
    }

    mod model_tests {
        use crate::models::{ListResponse, Post, PostEnvelope};

        #[test]
        fn test_list_envelope_with_total() {
            let page = serde_json::from_str::<ListResponse>(
                r#"{"data":[{"id":"1","slug":"a","content":""}],"total":28}"#,
            )
            .unwrap()
            .into_page();
            assert_eq!(page.posts.len(), 1);
            assert_eq!(page.total, Some(28));
        }

        #[test]
        fn test_list_envelope_without_total() {
            let page = serde_json::from_str::<ListResponse>(r#"{"data":[]}"#)
                .unwrap()
                .into_page();
            assert!(page.posts.is_empty());
            assert_eq!(page.total, None);
        }

        #[test]
        fn test_list_bare_array() {
            let page = serde_json::from_str::<ListResponse>(r#"[{"slug":"a"},{"slug":"b"}]"#)
                .unwrap()
                .into_page();
            assert_eq!(page.posts.len(), 2);
            assert_eq!(page.total, None);
        }

        #[test]
        fn test_single_post_envelope() {
            let post = serde_json::from_str::<PostEnvelope>(
                r#"{"data":{"id":7,"slug":"a","title":"T","content":"c"}}"#,
            )
            .unwrap()
            .data;
            assert_eq!(post.slug, "a");
            // numeric ids are normalized to strings
            assert_eq!(post.id, "7");
        }

        #[test]
        fn test_post_display_fallbacks() {
            let post: Post = serde_json::from_str(r#"{"slug":"a","content":""}"#).unwrap();
            assert_eq!(post.display_title(), "Untitled Post");
            assert_eq!(post.author("Someone"), "Someone");
            assert!(post.cover().is_none());
            assert!(post.created().is_none());
        }

        #[test]
        fn test_created_accepts_naive_and_date_only() {
            let mut post = Post {
                created_at: Some("2024-03-01T12:00:00.5".into()),
                ..Default::default()
            };
            assert!(post.created().is_some());

            post.created_at = Some("2024-03-01".into());
            assert!(post.created().is_some());

            post.created_at = Some("yesterday".into());
            assert!(post.created().is_none());
        }
    }
}
