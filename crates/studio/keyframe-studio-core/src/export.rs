//! CSS `@keyframes` export.

use std::fmt::Write as _;

use crate::data::{Animation, PropertySet};

/// CSS identifier for an animation name: whitespace runs become `-`, lowercased.
pub fn css_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
        } else {
            in_space = false;
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Transform declaration of the exported keyframe steps (scale in percent).
pub fn export_transform(p: &PropertySet) -> String {
    format!(
        "translateX({}px) translateY({}px) scaleX({}%) scaleY({}%) rotate({}deg) skewX({}deg) skewY({}deg)",
        p.translate_x, p.translate_y, p.scale_x, p.scale_y, p.rotation, p.skew_x, p.skew_y
    )
}

/// Render the `@keyframes` block plus a usage rule for `selector`.
pub fn export_css(animation: &Animation, selector: &str) -> String {
    let ident = css_identifier(&animation.name);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "@keyframes {ident} {{");
    for kf in animation.sorted_keyframes() {
        let _ = writeln!(out, "  {}% {{", kf.time);
        let _ = writeln!(out, "    transform: {};", export_transform(&kf.properties));
        let _ = writeln!(out, "  }}");
    }
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{selector} {{");
    let _ = writeln!(
        out,
        "  animation: {ident} {}s {} infinite;",
        animation.duration_seconds, animation.easing
    );
    let _ = write!(out, "}}");
    out
}
