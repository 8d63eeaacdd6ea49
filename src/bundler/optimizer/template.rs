//! Optimizer script templates.
//!
//! Values are inserted as JSON literals, already serialized by the caller,
//! so templates are rendered without HTML escaping.

/// Reads the loader configuration and merges `overrides` over it, key by key.
pub const PRELUDE_TEMPLATE: &str = r#"var conf = require("fs").readFileSync({{config_file}}, {
    encoding: "UTF-8"
});
eval("conf = " + conf + ";");
var overrides = {{overrides}};
for (var key in overrides) {
    conf[key] = overrides[key];
}
"#;

/// Runs the RequireJS optimizer over the merged configuration.
///
/// The build summary goes to stderr; a failed build exits with status 1.
pub const OPTIMIZE_TEMPLATE: &str = r#"{{> prelude}}
require("requirejs").optimize(conf, function (result) {
    console.warn(result);
}, function (err) {
    console.warn(err);
    process.exit(1);
});
"#;
