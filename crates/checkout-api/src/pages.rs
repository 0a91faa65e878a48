//! HTML pages served around the hosted checkout.

/// Home page: the `#submitBtn` trigger, Stripe.js and the wasm loader
pub const HOME: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Subscribe</title>
    <script src="https://js.stripe.com/v3/"></script>
</head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);">
    <div style="background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <h1>Subscribe</h1>
        <p style="color: #666;">Monthly plan, billed through Stripe.</p>
        <button type="button" id="submitBtn">Subscribe</button>
    </div>
    <script type="module">
        import init from "/static/pkg/checkout_wasm.js";
        init();
    </script>
</body>
</html>
"#;

/// Cancel page
pub const CANCEL: &str = r#"<!DOCTYPE html>
<html>
<head><title>Payment Cancelled</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);">
    <div style="background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <h1>Payment Cancelled</h1>
        <p style="color: #666;">No charges were made.</p>
        <p><a href="/">Back</a></p>
    </div>
</body>
</html>
"#;

/// Success page for `session_id`
pub fn success(session_id: Option<&str>) -> String {
    let session_id = escape_html(session_id.unwrap_or("unknown"));
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Payment Successful</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);">
    <div style="background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <h1>Subscription Active</h1>
        <p>Session: <code>{}</code></p>
        <p style="color: #666;">Your payment was processed successfully.</p>
    </div>
</body>
</html>
"#,
        session_id
    )
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
