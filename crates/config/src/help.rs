//! Help text shown alongside configuration errors

/// Command line usage
pub const USAGE: &str = "\
USAGE: checkhealth [--check] <FILE>

REQUIRED ARGUMENT:

    FILE
        Relative or absolute path to an endpoint YAML configuration file.
";

/// Endpoint file format, printed when the file cannot be parsed
pub const CONFIG_FORMAT_HELP: &str = r#"
CONFIGURATION FILE:

    The configuration file defines a list of endpoints to query in YAML.
    Each entry has the following fields:

        name (string, required)
            A free-text description of the endpoint.

        url (string, required)
            The URL of the HTTP endpoint.

        method (string, optional)
            The HTTP method to use. Defaults to GET.

        headers (dictionary, optional)
            HTTP headers to add to, or override in, the default request.

        body (string, optional)
            A JSON-encoded string sent as the request body. If omitted, no
            body is sent.

    Example:
        - name: fetch.com some post endpoint
          url: https://fetch.com/some/post/endpoint
          method: POST
          headers:
            content-type: application/json
            user-agent: fetch-synthetic-monitor
          body: '{"foo":"bar"}'
"#;
