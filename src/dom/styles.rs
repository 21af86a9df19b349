//! Shadow-root stylesheet for the widget.
//!
//! Injected as a `<style>` element when the shadow root is created. Colors
//! can be themed from the host page through CSS custom properties.

/// Custom property prefix shared by every themable value.
pub const VAR_PREFIX: &str = "--component-anatomy";

/// Generates the widget CSS.
pub fn generate_anatomy_css() -> String {
    let var = VAR_PREFIX;

    format!(
        r#"
*, *:before, *:after {{
    box-sizing: border-box;
}}
#component-anatomy {{
    display: inline-flex;
}}
#component-anatomy[data-orientation="vertical"] {{
    flex-direction: column;
}}
#area {{
    display: inline-block;
    margin: 0;
    padding: 0;
    position: relative;
    list-style: none;
    counter-reset: anatomy;
}}
#area li:before {{
    content: counter(anatomy);
    counter-increment: anatomy;
}}
#pins {{
    margin: 0;
    padding: 0;
    position: absolute;
    inset: 0;
}}
#pins li {{
    position: absolute;
    border: 3px solid var({var}--pin-bg, red);
    background: var({var}--pin-bg, red);
    color: var({var}--pin-fg, white);
    transform: translate(-50%, -50%);
    width: 1.5em;
    height: 1.5em;
    border-radius: 1.5em;
    display: flex;
    align-items: center;
    justify-content: center;
}}
#pins li[aria-current] {{
    border-color: var({var}--current, darkorange);
}}
#component-anatomy:not([data-edit]) #pins:hover li {{
    opacity: 0;
}}
#list {{
    width: max-content;
}}
#list li:not(:last-child) {{
    margin-bottom: .5em;
}}
"#
    )
}
