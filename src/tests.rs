#[cfg(test)]
mod tests {

    mod slug_tests {
        use crate::services::slug::{generate_slug, shorten_slug, validate_slug, MAX_SLUG_LENGTH};

        #[test]
        fn test_generate_slug_basic() {
            assert_eq!(generate_slug("Hello World"), "hello-world");
        }

        #[test]
        fn test_generate_slug_empty() {
            assert_eq!(generate_slug(""), "");
        }

        #[test]
        fn test_generate_slug_polish_title() {
            assert_eq!(generate_slug("Ćma w łóżku"), "cma-w-lozku");
        }

        #[test]
        fn test_generate_slug_every_transliteration() {
            assert_eq!(generate_slug("ąćęłńóśżź"), "acelnoszz");
            assert_eq!(generate_slug("ĄĆĘŁŃÓŚŻŹ"), "acelnoszz");
        }

        #[test]
        fn test_generate_slug_untabled_accents_become_separators() {
            assert_eq!(generate_slug("Café au lait"), "caf-au-lait");
        }

        #[test]
        fn test_generate_slug_strips_single_boundary_dash() {
            assert_eq!(
                generate_slug("-leading and trailing-"),
                "leading-and-trailing"
            );
            assert_eq!(generate_slug("--- many ---"), "many");
        }

        #[test]
        fn test_generate_slug_special_characters() {
            assert_eq!(generate_slug("Hello, World!"), "hello-world");
            assert_eq!(generate_slug("C++ & Rust: 2024?"), "c-rust-2024");
        }

        #[test]
        fn test_generate_slug_numbers() {
            assert_eq!(generate_slug("Article 123"), "article-123");
        }

        #[test]
        fn test_generate_slug_multiple_spaces() {
            assert_eq!(generate_slug("Hello   World"), "hello-world");
        }

        #[test]
        fn test_generate_slug_leading_trailing_spaces() {
            assert_eq!(generate_slug("  Hello World  "), "hello-world");
        }

        #[test]
        fn test_generate_slug_only_punctuation() {
            assert_eq!(generate_slug("!!!"), "");
            assert_eq!(generate_slug("-"), "");
        }

        #[test]
        fn test_generate_slug_is_idempotent() {
            let titles = [
                "",
                "Hello World",
                "Ćma w łóżku",
                "-leading and trailing-",
                "  ?? Why  English Tenses Matter ?? ",
                "Żółć & gęślą jaźń",
                "already-a-slug",
            ];
            for title in titles {
                let once = generate_slug(title);
                assert_eq!(generate_slug(&once), once, "title: {title:?}");
            }
        }

        #[test]
        fn test_generated_slugs_validate() {
            let slug = generate_slug("Present Perfect vs Past Simple: a Guide");
            assert_eq!(slug, "present-perfect-vs-past-simple-a-guide");
            assert!(validate_slug(&slug));
        }

        #[test]
        fn test_shorten_slug_keeps_short_slugs() {
            assert_eq!(shorten_slug("hello-world"), "hello-world");
            let exact = "a".repeat(MAX_SLUG_LENGTH);
            assert_eq!(shorten_slug(&exact), exact);
        }

        #[test]
        fn test_shorten_slug_drops_dangling_dash() {
            // 45 words of "word-" put a dash at byte 200.
            let long = generate_slug(&"word ".repeat(45));
            assert_eq!(long.len(), 224);

            let short = shorten_slug(&long);
            assert_eq!(short.len(), 199);
            assert!(!short.ends_with('-'));
            assert!(validate_slug(short));
        }

        #[test]
        fn test_validate_slug_valid() {
            assert!(validate_slug("hello-world"));
            assert!(validate_slug("my-blog-post-2024"));
            assert!(validate_slug("a"));
            assert!(validate_slug("123"));
        }

        #[test]
        fn test_validate_slug_invalid_empty() {
            assert!(!validate_slug(""));
        }

        #[test]
        fn test_validate_slug_invalid_uppercase() {
            assert!(!validate_slug("Hello-World"));
        }

        #[test]
        fn test_validate_slug_invalid_special_chars() {
            assert!(!validate_slug("hello_world"));
            assert!(!validate_slug("hello world"));
            assert!(!validate_slug("hello!world"));
            assert!(!validate_slug("łódź"));
        }

        #[test]
        fn test_validate_slug_too_long() {
            let long_slug = "a".repeat(201);
            assert!(!validate_slug(&long_slug));
        }

        #[test]
        fn test_validate_slug_max_length() {
            let max_slug = "a".repeat(200);
            assert!(validate_slug(&max_slug));
        }
    }

    mod model_tests {
        use crate::models::{Badge, Post, SignalRating, UserRole};

        #[test]
        fn test_user_role_parsing() {
            assert_eq!("admin".parse::<UserRole>(), Ok(UserRole::Admin));
            assert_eq!("AUTHOR".parse::<UserRole>(), Ok(UserRole::Author));
            assert_eq!("viewer".parse::<UserRole>(), Ok(UserRole::Viewer));
            assert!("owner".parse::<UserRole>().is_err());
        }

        #[test]
        fn test_user_role_permissions() {
            assert!(UserRole::Admin.can_edit_posts());
            assert!(UserRole::Author.can_edit_posts());
            assert!(!UserRole::Viewer.can_edit_posts());
        }

        #[test]
        fn test_badge_tiers() {
            assert_eq!(Badge::for_percent(100), Badge::Good);
            assert_eq!(Badge::for_percent(80), Badge::Good);
            assert_eq!(Badge::for_percent(79), Badge::Warning);
            assert_eq!(Badge::for_percent(50), Badge::Warning);
            assert_eq!(Badge::for_percent(49), Badge::Poor);
            assert_eq!(Badge::for_percent(0), Badge::Poor);
        }

        #[test]
        fn test_rating_points() {
            assert_eq!(SignalRating::Excellent.points(), Some(1.0));
            assert_eq!(SignalRating::Acceptable.points(), Some(0.5));
            assert_eq!(SignalRating::Poor.points(), Some(0.0));
            assert_eq!(SignalRating::NotApplicable.points(), None);
        }

        #[test]
        fn test_post_keyword_list_is_trimmed() {
            let post = Post {
                id: 1,
                slug: "tenses".to_string(),
                title: "Tenses".to_string(),
                meta_description: String::new(),
                keywords: "grammar, tenses,,".to_string(),
                image_url: None,
                category: None,
                content: String::new(),
                plain_content: String::new(),
                reading_time: 1,
                views: 0,
                created_at: String::new(),
                updated_at: String::new(),
            };
            assert_eq!(post.keyword_list(), vec!["grammar", "tenses"]);
        }

        #[test]
        fn test_password_hash_not_serialized() {
            let user = crate::models::User {
                id: 1,
                username: "admin".to_string(),
                email: "admin@example.com".to_string(),
                password_hash: "secret-hash".to_string(),
                role: UserRole::Admin,
                created_at: String::new(),
                updated_at: String::new(),
            };
            let json = serde_json::to_string(&user).unwrap();
            assert!(!json.contains("secret-hash"));
            assert!(json.contains("\"role\":\"admin\""));
        }
    }
}
