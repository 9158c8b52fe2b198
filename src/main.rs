// src/main.rs
//
// Calculatrice exacte — point d’entrée NATIF + WEB (WASM)
// -------------------------------------------------------
// - NATIF, `--flux` : mode flux sur stdin, une ligne = un calcul ou une commande `$`
// - NATIF, sinon    : fenêtre eframe
// - WEB  (wasm32)   : eframe::WebRunner + <canvas>
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice exacte";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser)]
#[command(name = "calculatrice_exacte")]
#[command(about = "Calculatrice rationnelle exacte, évaluation gauche-droite sans priorité")]
#[command(version)]
struct Cli {
    /// Lit stdin ligne par ligne (calculs et commandes $file/$div/$echo) au lieu d’ouvrir la fenêtre
    #[arg(long)]
    flux: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use clap::Parser;
    use std::io;

    // RUST_LOG=debug pour voir jetons + replis
    env_logger::init();

    let cli = Cli::parse();

    if cli.flux {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut sortie = stdout.lock();
        match calculatrice_exacte::executer_flux(stdin.lock(), &mut sortie) {
            Ok(0) => std::process::exit(0),
            Ok(echecs) => {
                log::warn!("{echecs} ligne(s) en erreur");
                std::process::exit(1);
            }
            Err(e) => {
                log::error!("flux interrompu : {e}");
                std::process::exit(2);
            }
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([520.0, 740.0])
            .with_min_inner_size([420.0, 620.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|_cc| Ok(Box::<AppCalc>::default())),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
