//! Generated route tables checked against the lookup guarantees.

use axum::http::{Method, StatusCode};
use proptest::prelude::*;
use trie_router::Router;

/// One pattern segment together with the request segment that fills it.
#[derive(Debug, Clone)]
enum Part {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone)]
struct Route {
    parts: Vec<Part>,
    /// `(extension, stem)` for a trailing `*.ext` segment.
    wildcard: Option<(String, String)>,
}

impl Route {
    fn pattern(&self) -> String {
        let mut segments: Vec<String> = self
            .parts
            .iter()
            .enumerate()
            .map(|(i, part)| match part {
                Part::Literal(text) => text.clone(),
                Part::Param(_) => format!(":p{}", i),
            })
            .collect();
        if let Some((ext, _)) = &self.wildcard {
            segments.push(format!("*.{}", ext));
        }
        format!("/{}", segments.join("/"))
    }

    fn path(&self) -> String {
        let mut segments: Vec<String> = self
            .parts
            .iter()
            .map(|part| match part {
                Part::Literal(text) | Part::Param(text) => text.clone(),
            })
            .collect();
        if let Some((ext, stem)) = &self.wildcard {
            segments.push(format!("{}.{}", stem, ext));
        }
        format!("/{}", segments.join("/"))
    }

    fn depth(&self) -> usize {
        self.parts.len() + usize::from(self.wildcard.is_some())
    }
}

fn arb_part() -> impl Strategy<Value = Part> {
    prop_oneof![
        "[a-z]{1,6}".prop_map(Part::Literal),
        "[a-z0-9]{1,8}".prop_map(Part::Param),
    ]
}

fn arb_route() -> impl Strategy<Value = Route> {
    (
        prop::collection::vec(arb_part(), 0..6),
        prop::option::of(("[a-z]{2,4}", "[a-z]{1,6}")),
    )
        .prop_map(|(parts, wildcard)| Route { parts, wildcard })
}

fn router_for(routes: &[Route]) -> Router<usize> {
    let mut router = Router::new();
    for (i, route) in routes.iter().enumerate() {
        router.get(&route.pattern(), i);
        router.post(&route.pattern(), i);
    }
    router
}

proptest! {
    /// A lone route resolves its own concrete path and binds every parameter.
    #[test]
    fn prop_single_route_binds_substitutions(route in arb_route()) {
        let router = router_for(std::slice::from_ref(&route));
        let path = route.path();

        let hit = router.resolve(&Method::GET, &path);
        prop_assert!(hit.is_ok(), "{} did not resolve {}", route.pattern(), path);
        let hit = hit.unwrap();

        let pattern = route.pattern();
        prop_assert_eq!(hit.pattern, pattern.as_str());
        for (i, part) in route.parts.iter().enumerate() {
            if let Part::Param(value) = part {
                let name = format!("p{}", i);
                prop_assert_eq!(hit.params.get(&name), Some(value.as_str()));
            }
        }
        match &route.wildcard {
            Some((ext, stem)) => {
                let expected = format!("{}.{}", stem, ext);
                prop_assert_eq!(hit.filename.as_deref(), Some(expected.as_str()));
            }
            None => prop_assert!(hit.filename.is_none()),
        }
    }

    /// Every registered route stays reachable however its siblings are ordered.
    #[test]
    fn prop_every_route_resolves(routes in prop::collection::vec(arb_route(), 1..8)) {
        let router = router_for(&routes);

        for route in &routes {
            let path = route.path();
            let hit = router.resolve(&Method::GET, &path);
            prop_assert!(hit.is_ok(), "{} did not resolve {}", route.pattern(), path);
        }
    }

    /// A path deeper than anything registered misses under every method.
    #[test]
    fn prop_other_segment_counts_miss(
        routes in prop::collection::vec(arb_route(), 1..8),
        extra in prop::collection::vec("[a-z0-9]{1,6}", 1..4),
    ) {
        let router = router_for(&routes);
        let longest = routes.iter().map(Route::depth).max().unwrap_or(0);

        let mut segments: Vec<String> = (0..longest).map(|i| format!("s{}", i)).collect();
        segments.extend(extra);
        let path = format!("/{}", segments.join("/"));

        for method in [Method::GET, Method::POST, Method::PUT] {
            let err = router.resolve(&method, &path);
            prop_assert!(err.is_err());
            prop_assert_eq!(err.unwrap_err().status(), StatusCode::NOT_FOUND);
        }
    }
}
