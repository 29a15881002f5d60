use crate::controller::UiController;
use crate::models::{ActivityCard, RenderedView, ViewState};
use crate::render::{category_label, CATEGORIES};

pub fn render_index(ui: &UiController) -> String {
    let hidden = |visible: bool| if visible { "" } else { " hidden" };

    let (loading, error) = match ui.view() {
        ViewState::Loading => (true, false),
        ViewState::Error { .. } => (false, true),
        _ => (false, false),
    };

    let (single, list) = match ui.view() {
        ViewState::Success {
            view: RenderedView::Single { card },
        } => (Some(card), None),
        ViewState::Success {
            view: RenderedView::List { heading, cards },
        } => (None, Some((heading.as_str(), cards.as_slice()))),
        _ => (None, None),
    };

    let single_html = single.map(render_single_card).unwrap_or_default();
    let (list_heading, list_html) = list
        .map(|(heading, cards)| {
            let items: String = cards.iter().map(render_list_card).collect();
            (escape(heading), items)
        })
        .unwrap_or_default();

    INDEX_HTML
        .replace("{{CATEGORY_BUTTONS}}", &render_category_buttons(ui))
        .replace("{{LOADING_HIDDEN}}", hidden(loading))
        .replace("{{ERROR_HIDDEN}}", hidden(error))
        .replace("{{CARD_HIDDEN}}", hidden(single.is_some()))
        .replace("{{LIST_HIDDEN}}", hidden(list.is_some()))
        .replace("{{IDLE_HIDDEN}}", hidden(matches!(ui.view(), ViewState::Idle)))
        .replace("{{SINGLE_CARD}}", &single_html)
        .replace("{{CATEGORY_TITLE}}", &list_heading)
        .replace("{{ACTIVITIES}}", &list_html)
}

fn render_category_buttons(ui: &UiController) -> String {
    CATEGORIES
        .iter()
        .map(|category| {
            let active = if ui.is_selected(category) { " active" } else { "" };
            format!(
                r#"<form method="post" action="/category/{category}" class="inline"><button type="submit" class="category-btn{active}" data-category="{category}">{label}</button></form>"#,
                label = category_label(category),
            )
        })
        .collect()
}

fn render_card_body(card: &ActivityCard, title_tag: &str) -> String {
    format!(
        r#"<div class="activity-header"><span class="activity-type">{kind}</span><span class="participants">{participants}</span></div>
<{title_tag} class="activity-title">{title}</{title_tag}>
<p class="activity-description">{description}</p>
<div class="activity-footer"><span class="price">{price}</span><span class="accessibility">{accessibility}</span></div>"#,
        kind = escape(&card.type_label),
        participants = escape(&card.participants),
        title = escape(&card.title),
        description = escape(&card.description),
        price = escape(&card.price),
        accessibility = escape(&card.accessibility),
    )
}

fn render_single_card(card: &ActivityCard) -> String {
    render_card_body(card, "h2")
}

fn render_list_card(card: &ActivityCard) -> String {
    let delay = card.animation_delay.unwrap_or_default();
    format!(
        r#"<div class="activity-card" style="animation-delay: {delay:.1}s">{}</div>"#,
        render_card_body(card, "h3")
    )
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Activity Finder</title>
  <style>
    :root {
      --bg-1: #eef4f8;
      --bg-2: #c9e4de;
      --ink: #23313b;
      --accent: #ff7a59;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f6efe6 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .hidden {
      display: none !important;
    }

    .inline {
      display: inline;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    .btn,
    .category-btn {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      cursor: pointer;
      background: #fff;
      color: var(--accent-2);
      box-shadow: 0 6px 16px rgba(47, 72, 88, 0.12);
    }

    .btn-primary,
    .category-btn.active {
      background: var(--accent);
      color: #fff;
    }

    .activity-card {
      background: #fff;
      border-radius: 20px;
      padding: 20px 24px;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.1);
      animation: rise 500ms ease both;
    }

    .activity-header,
    .activity-footer {
      display: flex;
      justify-content: space-between;
      font-size: 0.9rem;
      color: #5b6b75;
    }

    #activitiesList {
      display: grid;
      gap: 14px;
    }

    .error {
      background: #ffe3dc;
      border-radius: 18px;
      padding: 18px 22px;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(12px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Activity Finder</h1>
      <p>Encuentra algo que hacer cuando te aburres.</p>
    </header>

    <section class="controls">
      <form method="post" action="/random" class="inline">
        <button type="submit" id="randomBtn" class="btn btn-primary">Actividad aleatoria</button>
      </form>
      {{CATEGORY_BUTTONS}}
    </section>

    <p id="idle" class="{{IDLE_HIDDEN}}">Elige una categoría o pide una actividad aleatoria.</p>

    <div id="loading" class="{{LOADING_HIDDEN}}">Cargando...</div>

    <div id="errorMessage" class="error{{ERROR_HIDDEN}}">
      <p>No se pudo obtener una actividad. Revisa tu conexión.</p>
      <form method="post" action="/retry">
        <button type="submit" class="btn btn-primary">Reintentar</button>
      </form>
    </div>

    <article id="activityCard" class="activity-card{{CARD_HIDDEN}}">
      {{SINGLE_CARD}}
    </article>

    <section id="activitiesContainer" class="{{LIST_HIDDEN}}">
      <h2 id="categoryTitle">{{CATEGORY_TITLE}}</h2>
      <div id="activitiesList">{{ACTIVITIES}}</div>
    </section>
  </main>

  <script>
    const loading = document.getElementById('loading');
    const regions = ['idle', 'errorMessage', 'activityCard', 'activitiesContainer']
      .map((id) => document.getElementById(id));

    document.querySelectorAll('form').forEach((form) => {
      form.addEventListener('submit', () => {
        regions.forEach((el) => el.classList.add('hidden'));
        loading.classList.remove('hidden');
      });
    });
  </script>
</body>
</html>
"#;
