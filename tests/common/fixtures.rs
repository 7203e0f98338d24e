//! Reusable fixture content.

#![allow(dead_code)]

/// Single hosting entry routed to a Cloud Function
pub const FUNCTION_FIREBASE_JSON: &str = r#"{
  "hosting": {
    "public": "public",
    "rewrites": [{ "source": "**", "function": "ssr" }]
  },
  "functions": { "source": "functions" }
}"#;

/// Single hosting entry routed to a Cloud Run service
pub const CLOUD_RUN_FIREBASE_JSON: &str = r#"{
  "hosting": {
    "public": "public",
    "rewrites": [{ "source": "**", "run": { "serviceId": "web-app" } }]
  }
}"#;

/// Two hosting entries selected by target
pub const MULTI_SITE_FIREBASE_JSON: &str = r#"{
  "hosting": [
    {
      "target": "app",
      "public": "app",
      "rewrites": [{ "source": "**", "run": { "serviceId": "app-svc" } }]
    },
    {
      "site": "blog",
      "public": "blog",
      "rewrites": [{ "source": "**", "function": "blog" }]
    }
  ],
  "functions": { "source": "functions" }
}"#;

pub const FUNCTIONS_PACKAGE_JSON: &str = r#"{
  "name": "functions",
  "main": "index.js",
  "engines": { "node": "20" }
}"#;

pub const PROJECT_PACKAGE_JSON: &str = r#"{
  "name": "web-app",
  "type": "module",
  "scripts": { "build": "vite build" },
  "engines": { "node": "18" }
}"#;

/// Minimal framework build output and static assets
pub const BUILD_OUTPUT: &[(&str, &str)] = &[
    (".svelte-kit/output/client/_app/start.js", "export const start = 1;"),
    (".svelte-kit/output/server/index.js", "export class Server {}"),
    (".svelte-kit/output/server/manifest.js", "export const manifest = {};"),
    (".svelte-kit/output/prerendered/about.html", "<h1>About</h1>"),
    ("static/favicon.png", "png"),
];
