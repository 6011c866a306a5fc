use parley_types::Session;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::debug;

pub const LOGIN_PATH: &str = "/login";
pub const REDIRECT_PARAM: &str = "redirect";
pub const DEFAULT_TITLE: &str = "Parley";

/// Characters escaped in a query value; `/`, `?` and `:` stay readable.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}')
    .add(b'^');

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RouteMeta {
    pub title: Option<&'static str>,
    pub requires_auth: bool,
}

/// Static route declaration. Child paths are relative to their parent and
/// segments starting with `:` match any single segment.
#[derive(Debug, PartialEq)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
    pub children: &'static [RouteRecord],
}

pub static ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: "/",
        name: "home",
        meta: RouteMeta {
            title: None,
            requires_auth: false,
        },
        children: &[],
    },
    RouteRecord {
        path: "/login",
        name: "login",
        meta: RouteMeta {
            title: Some("Login / Register"),
            requires_auth: false,
        },
        children: &[],
    },
    RouteRecord {
        path: "/test",
        name: "test",
        meta: RouteMeta {
            title: Some("Test Page"),
            requires_auth: true,
        },
        children: &[],
    },
    RouteRecord {
        path: "/chat",
        name: "chat",
        meta: RouteMeta {
            title: Some("Chat"),
            requires_auth: true,
        },
        children: &[],
    },
];

/// A navigation target after matching: the records from outermost to
/// innermost. Unknown paths match nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedRoute {
    pub full_path: String,
    pub path: String,
    pub matched: Vec<&'static RouteRecord>,
}

impl ResolvedRoute {
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|record| record.meta.requires_auth)
    }

    /// The innermost record that sets a title wins.
    pub fn title(&self) -> Option<&'static str> {
        self.matched.iter().rev().find_map(|record| record.meta.title)
    }

    pub fn name(&self) -> Option<&'static str> {
        self.matched.last().map(|record| record.name)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RouteTable {
    records: &'static [RouteRecord],
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(ROUTES)
    }
}

impl RouteTable {
    pub const fn new(records: &'static [RouteRecord]) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &'static [RouteRecord] {
        self.records
    }

    pub fn resolve(&self, fullPath: &str) -> ResolvedRoute {
        let path = strip_query_and_fragment(fullPath);
        let segments = split_segments(path);

        let mut matched = Vec::new();
        if !match_records(self.records, &segments, &mut matched) {
            matched.clear();
        }

        ResolvedRoute {
            full_path: fullPath.to_string(),
            path: path.to_string(),
            matched,
        }
    }
}

fn strip_query_and_fragment(fullPath: &str) -> &str {
    let end = fullPath
        .find(|c: char| c == '?' || c == '#')
        .unwrap_or(fullPath.len());
    &fullPath[..end]
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

fn match_records(
    records: &'static [RouteRecord],
    segments: &[&str],
    chain: &mut Vec<&'static RouteRecord>,
) -> bool {
    for record in records {
        let pattern = split_segments(record.path);
        if pattern.len() > segments.len() {
            continue;
        }
        let prefixMatches = pattern
            .iter()
            .zip(segments)
            .all(|(expected, actual)| expected.starts_with(':') || expected == actual);
        if !prefixMatches {
            continue;
        }

        chain.push(record);
        let rest = &segments[pattern.len()..];
        if rest.is_empty() || match_records(record.children, rest, chain) {
            return true;
        }
        chain.pop();
    }
    false
}

/// Joins the pieces a browser location exposes, with or without their
/// leading `?` and `#`.
pub fn full_path(pathname: &str, search: &str, hash: &str) -> String {
    let mut fullPath = if pathname.is_empty() {
        "/".to_string()
    } else {
        pathname.to_string()
    };
    let search = search.trim_start_matches('?');
    if !search.is_empty() {
        fullPath.push('?');
        fullPath.push_str(search);
    }
    let hash = hash.trim_start_matches('#');
    if !hash.is_empty() {
        fullPath.push('#');
        fullPath.push_str(hash);
    }
    fullPath
}

/// Login location that brings the user back to `fullPath` afterwards.
pub fn login_redirect(fullPath: &str) -> String {
    format!(
        "{LOGIN_PATH}?{REDIRECT_PARAM}={}",
        utf8_percent_encode(fullPath, QUERY_VALUE)
    )
}

#[derive(Clone, Debug, PartialEq)]
pub enum Navigation {
    Allow,
    Redirect(String),
}

/// Receives the page title chosen for each navigation.
pub trait TitleSink {
    fn set_title(&self, title: &str);
}

/// Writes `document.title` in the browser; a no-op elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentTitle;

impl TitleSink for DocumentTitle {
    fn set_title(&self, title: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(document) = web_sys::window().and_then(|window| window.document()) {
                document.set_title(title);
            }
        }
        #[cfg(not(feature = "csr"))]
        debug!("document title: {title}");
    }
}

/// Runs before every navigation: titles the page, then sends signed-out
/// users away from routes that need a session.
#[derive(Clone)]
pub struct AuthGuard<T> {
    table: RouteTable,
    session: Session,
    titles: T,
}

impl<T: TitleSink> AuthGuard<T> {
    pub fn new(table: RouteTable, session: Session, titles: T) -> Self {
        Self {
            table,
            session,
            titles,
        }
    }

    pub fn table(&self) -> RouteTable {
        self.table
    }

    pub fn before_each(&self, to: &ResolvedRoute) -> Navigation {
        self.titles.set_title(to.title().unwrap_or(DEFAULT_TITLE));

        if to.requires_auth() && !self.session.is_authenticated() {
            let target = login_redirect(&to.full_path);
            debug!(from = %to.full_path, to = %target, "redirecting signed-out navigation");
            return Navigation::Redirect(target);
        }
        Navigation::Allow
    }

    pub fn navigate(&self, fullPath: &str) -> Navigation {
        self.before_each(&self.table.resolve(fullPath))
    }
}
