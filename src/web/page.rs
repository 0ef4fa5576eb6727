use crate::handlers::SessionView;

pub const BACKGROUND_IMAGE_URL: &str = "https://png.pngtree.com/thumb_back/fw800/background/20231228/pngtree-view-from-above-a-delectable-bowl-of-pasta-with-kitchen-tools-image_13855598.png";

pub const PAGE_ICON: &str = "data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' \
    viewBox='0 0 100 100'><text y='.9em' font-size='90'>🥗</text></svg>";

/// Render the single-page view for the current session state.
pub fn render(view: &SessionView) -> String {
    let mut sections = String::new();

    if let Some(recommendation) = &view.recommendation {
        sections.push_str(&format!(
            "<section class=\"result\"><h3>Personalized Recommendations:</h3><div class=\"text\">{}</div></section>\n",
            html_escape(recommendation)
        ));
    }

    // The question box appears once an upload was attempted, even a failed one.
    if view.uploaded {
        sections.push_str(&format!(
            r#"<form class="query" method="post" action="/query">
<label for="query">Ask a question about the product or share your personal concerns:</label>
<input type="text" id="query" name="query" value="{}">
<button type="submit">Submit</button>
</form>
"#,
            html_escape(view.last_query.as_deref().unwrap_or(""))
        ));
    }

    if let Some(response) = &view.query_response {
        sections.push_str(&format!(
            "<section class=\"result\"><h3>Response to Your Query:</h3><div class=\"text\">{}</div></section>\n",
            html_escape(response)
        ));
    }

    if let Some(error) = &view.error {
        sections.push_str(&format!(
            "<div class=\"error\" role=\"alert\">{}</div>\n",
            html_escape(error)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Health Recommendation Generator</title>
<link rel="icon" href="{icon}">
<style>
body {{ margin: 0; font-family: system-ui, sans-serif; background-image: url('{background}'); background-size: cover; background-repeat: no-repeat; background-position: center; min-height: 100vh; }}
main {{ max-width: 1100px; margin: 0 auto; padding: 2rem; background: rgba(255, 255, 255, 0.88); min-height: 100vh; }}
form {{ margin: 1rem 0; }}
label {{ display: block; margin-bottom: 0.5rem; }}
input[type=text] {{ width: 100%; padding: 0.5rem; box-sizing: border-box; }}
.text {{ white-space: pre-wrap; }}
.error {{ padding: 0.75rem 1rem; border-radius: 6px; background: #fde8e8; color: #9b1c1c; }}
</style>
</head>
<body>
<main>
<h1>🥗 Personalized Health Recommendation Generator</h1>
<form class="upload" method="post" action="/upload" enctype="multipart/form-data">
<label for="image">Upload a product nutrient page image</label>
<input type="file" id="image" name="image" accept=".png,.jpg,.jpeg,image/png,image/jpeg" onchange="this.form.submit()">
<noscript><button type="submit">Upload</button></noscript>
</form>
{sections}</main>
</body>
</html>
"#,
        background = BACKGROUND_IMAGE_URL,
        icon = PAGE_ICON,
        sections = sections,
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
