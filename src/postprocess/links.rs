//! Repairs for the malformed links some sources produce.
//!
//! Both functions are pure and idempotent.

use url::Url;

/// Strip copies of `domain` that were prepended to an already absolute link.
///
/// Handles both a repeated domain and a domain glued onto a link from another
/// site, as long as a scheme follows the prefix.
///
/// ```ignore
/// assert_eq!(
///     fix_doubled_domain("https://a.comhttps://a.com/x", "https://a.com"),
///     "https://a.com/x"
/// );
/// assert_eq!(
///     fix_doubled_domain("https://a.comhttps://b.org/y", "https://a.com"),
///     "https://b.org/y"
/// );
/// ```
pub fn fix_doubled_domain(link: &str, domain: &str) -> String {
    if domain.is_empty() {
        return link.to_string();
    }
    let mut rest = link;
    while let Some(stripped) = rest.strip_prefix(domain) {
        if !has_scheme(stripped) {
            break;
        }
        rest = stripped;
    }
    rest.to_string()
}

fn has_scheme(link: &str) -> bool {
    link.starts_with("https://") || link.starts_with("http://")
}

/// Host suffix of the AMP cache that serves proxied copies of publisher pages.
pub const AMP_CACHE_SUFFIX: &str = ".cdn.ampproject.org";

/// Re-root an AMP-cache copy of a `domain` page onto `domain` itself.
///
/// Only links served from [`AMP_CACHE_SUFFIX`] whose first `drop_segments`
/// path segments end with the canonical host (`/c/s/www.jpost.com/...`) are
/// rewritten: those segments are dropped and the rest is placed under
/// `domain`. Every other link, including unparseable ones, is returned
/// unchanged.
pub fn reroot_link(link: &str, domain: &str, drop_segments: usize) -> String {
    let (Ok(parsed), Ok(canonical)) = (Url::parse(link), Url::parse(domain)) else {
        return link.to_string();
    };
    let (Some(host), Some(canonical_host)) = (parsed.host_str(), canonical.host_str()) else {
        return link.to_string();
    };
    if !host.ends_with(AMP_CACHE_SUFFIX) {
        return link.to_string();
    }
    let Some(segments) = parsed.path_segments() else {
        return link.to_string();
    };

    let segments: Vec<&str> = segments.collect();
    if drop_segments == 0 || segments.len() <= drop_segments {
        return link.to_string();
    }
    let (prefix, kept) = segments.split_at(drop_segments);
    if prefix.last() != Some(&canonical_host) || kept.iter().all(|s| s.is_empty()) {
        return link.to_string();
    }

    let mut rerooted = format!("{}/{}", domain.trim_end_matches('/'), kept.join("/"));
    if let Some(query) = parsed.query() {
        rerooted.push('?');
        rerooted.push_str(query);
    }
    rerooted
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIVE: &str = "https://www.utilitydive.com";
    const JPOST: &str = "https://www.jpost.com";

    #[test]
    fn test_fix_doubled_domain() {
        assert_eq!(
            fix_doubled_domain("https://www.utilitydive.comhttps://www.utilitydive.com/news/x/1/", DIVE),
            "https://www.utilitydive.com/news/x/1/"
        );
    }

    #[test]
    fn test_fix_doubled_domain_collapses_triples() {
        let link = format!("{DIVE}{DIVE}{DIVE}/news/y/");
        assert_eq!(fix_doubled_domain(&link, DIVE), "https://www.utilitydive.com/news/y/");
    }

    #[test]
    fn test_fix_doubled_domain_leaves_good_links() {
        let good = "https://www.utilitydive.com/news/z/";
        assert_eq!(fix_doubled_domain(good, DIVE), good);
        assert_eq!(fix_doubled_domain("https://elsewhere.org/a", DIVE), "https://elsewhere.org/a");
    }

    #[test]
    fn test_fix_doubled_domain_is_idempotent() {
        for link in [
            format!("{DIVE}{DIVE}/news/a/"),
            format!("{DIVE}/news/b/"),
            format!("{DIVE}{DIVE}{DIVE}"),
            "relative/path".to_string(),
        ] {
            let once = fix_doubled_domain(&link, DIVE);
            assert_eq!(fix_doubled_domain(&once, DIVE), once);
        }
    }

    #[test]
    fn test_fix_doubled_domain_strips_prefix_from_cross_posts() {
        let link = format!("{DIVE}https://www.smartcitiesdive.com/news/x/1/");
        assert_eq!(fix_doubled_domain(&link, DIVE), "https://www.smartcitiesdive.com/news/x/1/");

        let link = format!("{DIVE}{DIVE}http://www.wastedive.com/news/y/");
        let once = fix_doubled_domain(&link, DIVE);
        assert_eq!(once, "http://www.wastedive.com/news/y/");
        assert_eq!(fix_doubled_domain(&once, DIVE), once);
    }

    #[test]
    fn test_reroot_amp_link() {
        let amp = "https://www-jpost-com.cdn.ampproject.org/c/s/www.jpost.com/business-and-innovation/article-800003";
        assert_eq!(
            reroot_link(amp, JPOST, 3),
            "https://www.jpost.com/business-and-innovation/article-800003"
        );
    }

    #[test]
    fn test_reroot_keeps_query() {
        let amp = "https://www-jpost-com.cdn.ampproject.org/c/s/www.jpost.com/article-1?amp=1";
        assert_eq!(reroot_link(amp, JPOST, 3), "https://www.jpost.com/article-1?amp=1");
    }

    #[test]
    fn test_reroot_leaves_canonical_and_unparseable_links() {
        let canonical = "https://www.jpost.com/business-and-innovation/article-1";
        assert_eq!(reroot_link(canonical, JPOST, 3), canonical);
        assert_eq!(reroot_link("not a url", JPOST, 3), "not a url");
    }

    #[test]
    fn test_reroot_leaves_other_sites_alone() {
        for link in [
            "https://www.ynetnews.com/business/article/abc123/solar-deal",
            "https://jpost.com/business-and-innovation/energy/article-5",
            "https://www.timesofisrael.com/liveblog/a/b/c",
        ] {
            assert_eq!(reroot_link(link, JPOST, 3), link);
        }
    }

    #[test]
    fn test_reroot_requires_canonical_host_in_amp_path() {
        let other = "https://www-haaretz-com.cdn.ampproject.org/c/s/www.haaretz.com/israel-news/1";
        assert_eq!(reroot_link(other, JPOST, 3), other);

        let short = "https://www-jpost-com.cdn.ampproject.org/c/s/www.jpost.com";
        assert_eq!(reroot_link(short, JPOST, 3), short);
    }

    #[test]
    fn test_reroot_is_idempotent() {
        let amp = "https://www-jpost-com.cdn.ampproject.org/c/s/www.jpost.com/a/article-9";
        let once = reroot_link(amp, JPOST, 3);
        assert_eq!(reroot_link(&once, JPOST, 3), once);
    }
}
