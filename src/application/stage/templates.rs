//! Generated JavaScript sources

use crate::domain::value_objects::FunctionName;

/// Server entry handed to the bundler.
///
/// Wraps the framework server for a Node.js `(request, response)` platform:
/// initializes once, coalesces multi-value headers, derives the public URL
/// from forwarded headers and writes the rendered response back.
pub const HANDLER_ENTRY: &str = r#"import process from 'process';
import {Server} from './server/index.js';
import {manifest} from './manifest.js';

const server = new Server(manifest);
let initialized;

function toHeaders(headers) {
	const out = {};
	for (const [key, value] of Object.entries(headers)) {
		out[key] = Array.isArray(value) ? value.join(',') : value;
	}
	return out;
}

function toRequest(request) {
	const protocol = request.headers['x-forwarded-proto'] || 'http';
	const host = request.headers['x-forwarded-host'] || request.headers.host || 'localhost';
	const url = new URL(request.url || '', `${protocol}://${host}`);
	const hasBody = !['GET', 'HEAD'].includes(request.method);
	return new Request(url.href, {
		method: request.method,
		headers: toHeaders(request.headers),
		body: hasBody ? request.rawBody ?? null : null,
	});
}

export default async function handler(request, response) {
	if (!initialized) {
		initialized = server.init({env: process.env});
	}
	await initialized;

	const rendered = await server.respond(toRequest(request), {
		getClientAddress() {
			return request.headers['x-forwarded-for'];
		},
	});

	if (!rendered) {
		return response.writeHead(404, 'Not Found').end();
	}

	const body = Buffer.from(await rendered.arrayBuffer());
	return response.writeHead(rendered.status, Object.fromEntries(rendered.headers)).end(body);
}
"#;

/// Lazily initialized function export for the functions entrypoint.
pub fn function_snippet(name: &FunctionName) -> String {
    let binding = name.server_binding();
    format!(
        r#"let {binding};
exports.{name} = functions.https.onRequest(async (request, response) => {{
	if (!{binding}) {{
		functions.logger.info("Initializing SSR server");
		{binding} = require("./{name}/index").default;
		functions.logger.info("SSR server initialized");
	}}
	return await {binding}(request, response);
}});"#
    )
}

/// True when `source` already assigns an export named `name`.
pub fn declares_export(source: &str, name: &FunctionName) -> bool {
    source.contains(&format!("{} =", name))
}
