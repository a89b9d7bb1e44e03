//! RSS 2.0 and Atom 1.0 renderings of the newest posts.

use crate::config::{FeedConfig, SiteConfig};
use crate::models::Post;
use crate::services::posts;
use crate::Database;
use anyhow::Result;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub const RSS_PATH: &str = "/rss.xml";
pub const ATOM_PATH: &str = "/atom.xml";

pub fn latest_posts(db: &Database, feed: &FeedConfig) -> Result<Vec<Post>> {
    posts::list_posts(db, feed.limit, 0)
}

struct XmlBuilder {
    writer: Writer<Vec<u8>>,
}

impl XmlBuilder {
    fn new() -> Result<Self> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(Self { writer })
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(element))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(element))?;
        Ok(())
    }

    fn text(&mut self, name: &str, value: &str) -> Result<()> {
        self.text_with(name, &[], value)
    }

    fn text_with(&mut self, name: &str, attrs: &[(&str, &str)], value: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.writer.write_event(Event::Text(BytesText::new(value)))?;
        self.end(name)
    }

    fn finish(self) -> Result<String> {
        Ok(String::from_utf8(self.writer.into_inner())?)
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn image_mime(image_url: &str) -> String {
    let path = url::Url::parse(image_url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| image_url.to_string());
    mime_guess::from_path(path)
        .first()
        .filter(|m| m.type_() == mime_guess::mime::IMAGE)
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| "image/jpeg".to_string())
}

fn rss_author(site: &SiteConfig) -> String {
    match &site.author.email {
        Some(email) => format!("{} ({})", email, site.author.name),
        None => site.author.name.clone(),
    }
}

pub fn render_rss(
    site: &SiteConfig,
    feed: &FeedConfig,
    posts: &[Post],
    updated: DateTime<Utc>,
) -> Result<String> {
    let self_link = format!("{}{}", site.base_url(), RSS_PATH);
    let blog_url = site.blog_url();
    let author = rss_author(site);

    let mut xml = XmlBuilder::new()?;
    xml.start(
        "rss",
        &[
            ("version", "2.0"),
            ("xmlns:atom", "http://www.w3.org/2005/Atom"),
            ("xmlns:content", "http://purl.org/rss/1.0/modules/content/"),
        ],
    )?;
    xml.start("channel", &[])?;
    xml.text("title", &site.title)?;
    xml.text("link", &blog_url)?;
    xml.text("description", &site.description)?;
    xml.text("language", &site.language)?;
    if let Some(ref copyright) = site.copyright {
        xml.text("copyright", copyright)?;
    }
    xml.text("generator", &feed.generator)?;
    xml.text("lastBuildDate", &updated.to_rfc2822())?;
    xml.empty(
        "atom:link",
        &[
            ("href", self_link.as_str()),
            ("rel", "self"),
            ("type", "application/rss+xml"),
        ],
    )?;
    if let Some(ref image) = site.image {
        xml.start("image", &[])?;
        xml.text("url", image)?;
        xml.text("title", &site.title)?;
        xml.text("link", &blog_url)?;
        xml.end("image")?;
    }

    for post in posts {
        let link = site.post_url(&post.slug);
        xml.start("item", &[])?;
        xml.text("title", &post.title)?;
        xml.text("link", &link)?;
        xml.text_with("guid", &[("isPermaLink", "true")], &link)?;
        if !post.meta_description.is_empty() {
            xml.text("description", &post.meta_description)?;
        }
        if !post.content.is_empty() {
            xml.text("content:encoded", &post.content)?;
        }
        xml.text("author", &author)?;
        if let Some(created) = parse_timestamp(&post.created_at) {
            xml.text("pubDate", &created.to_rfc2822())?;
        }
        for keyword in post.keyword_list() {
            xml.text("category", &keyword)?;
        }
        if let Some(ref image) = post.image_url {
            let mime = image_mime(image);
            xml.empty(
                "enclosure",
                &[("url", image.as_str()), ("length", "0"), ("type", mime.as_str())],
            )?;
        }
        xml.end("item")?;
    }

    xml.end("channel")?;
    xml.end("rss")?;
    xml.finish()
}

pub fn render_atom(
    site: &SiteConfig,
    feed: &FeedConfig,
    posts: &[Post],
    updated: DateTime<Utc>,
) -> Result<String> {
    let self_link = format!("{}{}", site.base_url(), ATOM_PATH);
    let blog_url = site.blog_url();

    let mut xml = XmlBuilder::new()?;
    xml.start("feed", &[("xmlns", "http://www.w3.org/2005/Atom")])?;
    xml.text("id", &blog_url)?;
    xml.text("title", &site.title)?;
    xml.text("subtitle", &site.description)?;
    xml.text("updated", &updated.to_rfc3339())?;
    xml.text("generator", &feed.generator)?;
    xml.empty("link", &[("rel", "alternate"), ("href", blog_url.as_str())])?;
    xml.empty(
        "link",
        &[
            ("rel", "self"),
            ("href", self_link.as_str()),
            ("type", "application/atom+xml"),
        ],
    )?;
    write_atom_author(&mut xml, site)?;
    if let Some(ref favicon) = site.favicon {
        xml.text("icon", favicon)?;
    }
    if let Some(ref image) = site.image {
        xml.text("logo", image)?;
    }
    if let Some(ref copyright) = site.copyright {
        xml.text("rights", copyright)?;
    }

    for post in posts {
        let link = site.post_url(&post.slug);
        xml.start("entry", &[])?;
        xml.text_with("title", &[("type", "text")], &post.title)?;
        xml.text("id", &link)?;
        xml.empty("link", &[("rel", "alternate"), ("href", link.as_str())])?;
        let updated_at = parse_timestamp(&post.updated_at).unwrap_or(updated);
        xml.text("updated", &updated_at.to_rfc3339())?;
        if let Some(created) = parse_timestamp(&post.created_at) {
            xml.text("published", &created.to_rfc3339())?;
        }
        if !post.meta_description.is_empty() {
            xml.text_with("summary", &[("type", "text")], &post.meta_description)?;
        }
        if !post.content.is_empty() {
            xml.text_with("content", &[("type", "html")], &post.content)?;
        }
        write_atom_author(&mut xml, site)?;
        for keyword in post.keyword_list() {
            xml.empty("category", &[("term", keyword.as_str())])?;
        }
        if let Some(ref image) = post.image_url {
            let mime = image_mime(image);
            xml.empty(
                "link",
                &[("rel", "enclosure"), ("href", image.as_str()), ("type", mime.as_str())],
            )?;
        }
        xml.end("entry")?;
    }

    xml.end("feed")?;
    xml.finish()
}

fn write_atom_author(xml: &mut XmlBuilder, site: &SiteConfig) -> Result<()> {
    xml.start("author", &[])?;
    xml.text("name", &site.author.name)?;
    if let Some(ref email) = site.author.email {
        xml.text("email", email)?;
    }
    if let Some(ref link) = site.author.link {
        xml.text("uri", link)?;
    }
    xml.end("author")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthorConfig;

    fn site() -> SiteConfig {
        SiteConfig {
            title: "Tips & Tricks".to_string(),
            description: "Expert English learning tips".to_string(),
            url: "https://example.com".to_string(),
            language: "en".to_string(),
            image: Some("https://example.com/logo.png".to_string()),
            favicon: Some("https://example.com/favicon.ico".to_string()),
            copyright: Some("All rights reserved".to_string()),
            author: AuthorConfig {
                name: "EnglishPro".to_string(),
                email: Some("contact@example.com".to_string()),
                link: Some("https://example.com".to_string()),
            },
        }
    }

    fn post(id: i64, slug: &str, title: &str) -> Post {
        Post {
            id,
            slug: slug.to_string(),
            title: title.to_string(),
            meta_description: "A short summary".to_string(),
            keywords: "grammar, tips,".to_string(),
            image_url: Some("https://cdn.example.com/cover.png".to_string()),
            category: None,
            content: "<p>Body</p>".to_string(),
            plain_content: "Body".to_string(),
            reading_time: 1,
            views: 0,
            created_at: "2025-03-01T10:00:00+00:00".to_string(),
            updated_at: "2025-03-02T10:00:00+00:00".to_string(),
        }
    }

    fn updated() -> DateTime<Utc> {
        parse_timestamp("2025-03-03T00:00:00+00:00").unwrap()
    }

    #[test]
    fn test_rss_channel_and_items() {
        let posts = vec![post(1, "first-post", "First <post>")];
        let rss = render_rss(&site(), &FeedConfig::default(), &posts, updated()).unwrap();

        assert!(rss.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(rss.contains("<title>Tips &amp; Tricks</title>"));
        assert!(rss.contains("<link>https://example.com/blog</link>"));
        assert!(rss.contains("href=\"https://example.com/rss.xml\""));
        assert!(rss.contains("<title>First &lt;post&gt;</title>"));
        assert!(rss.contains("<link>https://example.com/blog/first-post</link>"));
        assert!(rss.contains("<pubDate>Sat, 1 Mar 2025 10:00:00 +0000</pubDate>"));
        assert!(rss.contains("<content:encoded>&lt;p&gt;Body&lt;/p&gt;</content:encoded>"));
        assert!(rss.contains("<author>contact@example.com (EnglishPro)</author>"));
    }

    #[test]
    fn test_rss_keywords_become_categories() {
        let posts = vec![post(1, "first-post", "First")];
        let rss = render_rss(&site(), &FeedConfig::default(), &posts, updated()).unwrap();

        assert!(rss.contains("<category>grammar</category>"));
        assert!(rss.contains("<category>tips</category>"));
        assert_eq!(rss.matches("<category>").count(), 2);
    }

    #[test]
    fn test_rss_enclosure_type() {
        let posts = vec![post(1, "first-post", "First")];
        let rss = render_rss(&site(), &FeedConfig::default(), &posts, updated()).unwrap();
        assert!(rss.contains("type=\"image/png\""));
    }

    #[test]
    fn test_atom_entries() {
        let posts = vec![post(1, "a", "A"), post(2, "b", "B")];
        let atom = render_atom(&site(), &FeedConfig::default(), &posts, updated()).unwrap();

        assert!(atom.contains("<feed xmlns=\"http://www.w3.org/2005/Atom\">"));
        assert!(atom.contains("<id>https://example.com/blog/a</id>"));
        assert!(atom.contains("<id>https://example.com/blog/b</id>"));
        assert!(atom.contains("<published>2025-03-01T10:00:00+00:00</published>"));
        assert!(atom.contains("<updated>2025-03-02T10:00:00+00:00</updated>"));
        assert!(atom.contains("<category term=\"grammar\"/>"));
        assert!(atom.contains("<icon>https://example.com/favicon.ico</icon>"));
        assert_eq!(atom.matches("<entry>").count(), 2);
    }

    #[test]
    fn test_empty_feed_is_valid() {
        let atom = render_atom(&site(), &FeedConfig::default(), &[], updated()).unwrap();
        assert!(atom.contains("<updated>2025-03-03T00:00:00+00:00</updated>"));
        assert!(!atom.contains("<entry>"));
    }

    #[test]
    fn test_image_mime_falls_back_to_jpeg() {
        assert_eq!(image_mime("https://x.com/a.webp?size=2"), "image/webp");
        assert_eq!(image_mime("https://x.com/no-extension"), "image/jpeg");
    }
}
