//! src/noyau/session.rs
//!
//! Machine à états de la calculatrice (sans vue).
//!
//! Rôle : recevoir un jeton (étiquette de touche, texte opaque) et faire évoluer
//! la session : écran, opération en attente, drapeaux de mode, vue active.
//!
//! Contrats :
//! - Toute transition est totale : un jeton inconnu ne change RIEN (minuterie comprise).
//! - L’écran n’est jamais vide ("0" par défaut) ; les erreurs y sont du texte.
//! - Deux philosophies séparées par `Saisie` :
//!     Chainee  : chaque opérateur résout l’opération précédente (calcul enchaîné)
//!     Brouillon : l’écran EST l’expression, évaluée seulement sur "="
//! - Au plus une minuterie ; tout jeton reconnu l’annule avant ses propres effets,
//!   sauf les bascules de mode qui ne touchent QUE leur drapeau.
//! - Les opérandes viennent de `valeur` (dernier résultat rendu) ; le texte tapé
//!   n’est relu qu’à défaut.
//! - "C" ramène exactement la session initiale (réglages conservés).

use std::time::Duration;

use super::complexe::{est_litteral_complexe, parse_complexe, Nombre};
use super::eval::{evaluer, preparer, Expression, Liaisons};
use super::fonctions::{Fonction, Mode, Operateur};
use super::format::{format_decimales, lire_reel};
use super::integration::integrer_textes;
use super::reglages::Reglages;
use super::trace::{echantillonner, Fenetre, Point};

/// Décimales de la bannière d’intégrale.
const DECIMALES_INTEGRALE: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Vue {
    #[default]
    Standard,
    Graphe,
    Integration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Saisie {
    /// Opérande gauche + opérateur, toujours ensemble (jamais d’opérateur seul).
    Chainee {
        en_attente: Option<(Nombre, Operateur)>,
    },
    /// Le calcul enchaîné en cours est mis de côté, pas abandonné.
    Brouillon {
        suspendue: Option<(Nombre, Operateur)>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Graphe {
    pub fonction: String,
    pub fenetre: Fenetre,
    /// Fonction validée (une évaluation en x = 0 a réussi).
    pub pret: bool,
    /// Échantillons de la fonction validée, recalculés seulement à la validation
    /// ou au changement de fenêtre.
    points: Option<Vec<Point>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Champ {
    #[default]
    Fonction,
    BorneInf,
    BorneSup,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Integration {
    pub fonction: String,
    pub borne_inf: String,
    pub borne_sup: String,
    pub champ_actif: Champ,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActionDifferee {
    /// Message d’erreur => "0".
    EffacerErreur,
    /// Bannière "∫(…) = …" => valeur seule (réutilisable comme opérande).
    ResultatIntegration(f64),
    /// Échec d’intégration : retour à la vue standard, écran "0".
    RetourStandard,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minuterie {
    pub jeton: u64,
    pub delai: Duration,
    pub action: ActionDifferee,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    affichage: String,
    /// Nombre derrière l’écran quand celui-ci est un résultat rendu.
    valeur: Option<Nombre>,
    saisie: Saisie,
    attente_operande: bool,
    mode: Mode,
    vue: Vue,
    graphe: Graphe,
    integration: Integration,
    minuterie: Option<Minuterie>,
    compteur: u64,
    reglages: Reglages,
}

impl Default for Session {
    fn default() -> Self {
        Self::avec_reglages(Reglages::default())
    }
}

impl Session {
    pub fn avec_reglages(reglages: Reglages) -> Self {
        Self {
            affichage: "0".to_string(),
            valeur: None,
            saisie: Saisie::Chainee { en_attente: None },
            attente_operande: false,
            mode: Mode::default(),
            vue: Vue::Standard,
            graphe: Graphe {
                fonction: String::new(),
                fenetre: reglages.fenetre,
                pret: false,
                points: None,
            },
            integration: Integration {
                fonction: String::new(),
                borne_inf: reglages.borne_inf.clone(),
                borne_sup: reglages.borne_sup.clone(),
                champ_actif: Champ::Fonction,
            },
            minuterie: None,
            compteur: 0,
            reglages,
        }
    }

    /* ------------------------ Lecture (rendu) ------------------------ */

    pub fn affichage(&self) -> &str {
        &self.affichage
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn vue(&self) -> Vue {
        self.vue
    }

    pub fn saisie(&self) -> Saisie {
        self.saisie
    }

    pub fn attente_operande(&self) -> bool {
        self.attente_operande
    }

    pub fn graphe(&self) -> &Graphe {
        &self.graphe
    }

    pub fn integration(&self) -> &Integration {
        &self.integration
    }

    pub fn minuterie(&self) -> Option<Minuterie> {
        self.minuterie
    }

    pub fn reglages(&self) -> &Reglages {
        &self.reglages
    }

    /// Opérande + opérateur du calcul enchaîné (suspendu en mode algébrique).
    pub fn operation_en_attente(&self) -> Option<(Nombre, Operateur)> {
        match self.saisie {
            Saisie::Chainee { en_attente } => en_attente,
            Saisie::Brouillon { suspendue } => suspendue,
        }
    }

    /// Points à tracer : None tant que la fonction n’est pas validée.
    pub fn points_trace(&self) -> Option<&[Point]> {
        self.graphe.points.as_deref()
    }

    /* ------------------------ Entrées ------------------------ */

    /// Forme pure : (session, jeton) -> session'.
    pub fn apres(&self, jeton: &str) -> Session {
        let mut s = self.clone();
        s.appuyer(jeton);
        s
    }

    /// Point d’entrée unique : branche d’abord sur la vue, puis sur le jeton.
    pub fn appuyer(&mut self, jeton: &str) {
        // bascule : seul le drapeau change, minuterie comprise
        if self.vue == Vue::Standard && self.basculer(jeton) {
            tracing::debug!(jeton, mode = ?self.mode, "bascule de mode");
            return;
        }

        let minuterie = self.minuterie.take();

        let reconnu = match self.vue {
            Vue::Standard => self.jeton_standard(jeton),
            Vue::Graphe => self.jeton_graphe(jeton),
            Vue::Integration => self.jeton_integration(jeton),
        };

        if reconnu {
            tracing::debug!(jeton, vue = ?self.vue, affichage = %self.affichage, "jeton traité");
        } else {
            // no-op strict : la minuterie en cours survit
            self.minuterie = minuterie;
            tracing::debug!(jeton, vue = ?self.vue, "jeton ignoré");
        }
    }

    /// Fin de délai signalée par l’hôte. Sans effet si la minuterie a été annulée
    /// ou remplacée depuis (le dernier état gagne). Retourne true si appliquée.
    pub fn expirer(&mut self, jeton: u64) -> bool {
        match self.minuterie.take() {
            Some(m) if m.jeton == jeton => {
                self.appliquer_differee(m.action);
                true
            }
            autre => {
                self.minuterie = autre;
                false
            }
        }
    }

    /// Saisie texte dans le champ d’intégration actif.
    pub fn editer_champ(&mut self, texte: &str) {
        self.minuterie = None;
        let champ = match self.integration.champ_actif {
            Champ::Fonction => &mut self.integration.fonction,
            Champ::BorneInf => &mut self.integration.borne_inf,
            Champ::BorneSup => &mut self.integration.borne_sup,
        };
        texte.clone_into(champ);
    }

    /// Nouvelle fonction à tracer : doit être revalidée.
    pub fn editer_fonction_graphe(&mut self, texte: &str) {
        self.minuterie = None;
        texte.clone_into(&mut self.graphe.fonction);
        self.graphe.pret = false;
        self.graphe.points = None;
    }

    pub fn editer_fenetre(&mut self, fenetre: Fenetre) {
        self.minuterie = None;
        self.graphe.fenetre = fenetre;
        if self.graphe.pret {
            self.echantillonner_graphe();
        }
    }

    /* ------------------------ Vue standard ------------------------ */

    fn jeton_standard(&mut self, jeton: &str) -> bool {
        let mode = self.mode;

        match jeton {
            "C" => self.reinitialiser(),
            "del" => self.effacer_dernier(),
            "." => self.point_decimal(),
            "±" => self.changer_signe(),
            "=" => self.egal(),

            "graph" => self.ouvrir_graphe(),
            "integrate" => self.ouvrir_integration(),

            _ => {
                if let Some(texte) = texte_saisi(jeton) {
                    self.saisir(texte);
                } else if let Some(op) = Operateur::depuis_jeton(jeton) {
                    self.operateur(op, mode);
                } else if let Some(f) = Fonction::depuis_jeton(jeton) {
                    self.fonction(f, mode);
                } else {
                    return false;
                }
            }
        }
        true
    }

    /// deg/rad, complex, algebraic.
    fn basculer(&mut self, jeton: &str) -> bool {
        match jeton {
            "deg/rad" => self.mode = self.mode.bascule_degres(),
            "complex" => self.mode = self.mode.bascule_complexe(),
            "algebraic" => self.basculer_algebrique(),
            _ => return false,
        }
        true
    }

    fn reinitialiser(&mut self) {
        *self = Session::avec_reglages(self.reglages.clone());
    }

    /// Chiffre / constante : remplace si on attend un opérande ou si l’écran vaut "0".
    fn saisir(&mut self, texte: &str) {
        self.valeur = None;
        if self.attente_operande || self.affichage == "0" {
            texte.clone_into(&mut self.affichage);
            self.attente_operande = false;
        } else {
            self.affichage.push_str(texte);
        }
    }

    fn point_decimal(&mut self) {
        self.valeur = None;
        if self.attente_operande {
            self.affichage = "0.".to_string();
            self.attente_operande = false;
            return;
        }

        // série numérique courante = chiffres/points en fin d’écran
        let serie_a_un_point = self
            .affichage
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .any(|c| c == '.');

        if !serie_a_un_point {
            self.affichage.push('.');
        }
    }

    fn effacer_dernier(&mut self) {
        self.texte_courant();
        if self.affichage.chars().count() <= 1 {
            self.affichage = "0".to_string();
        } else {
            self.affichage.pop();
        }
    }

    fn changer_signe(&mut self) {
        match self.saisie {
            // niveau texte : bascule du '-' initial
            Saisie::Brouillon { .. } => {
                self.texte_courant();
                self.affichage = match self.affichage.strip_prefix('-') {
                    Some("") => "0".to_string(),
                    Some(reste) => reste.to_string(),
                    None => format!("-{}", self.affichage),
                };
            }
            Saisie::Chainee { .. } => {
                self.couper_litteral();
                let n = self.operande().oppose();
                self.affichage = n.to_string();
                // texte tapé : il le reste ("-4" peut devenir "-4+3i")
                self.valeur = self.valeur.map(|_| n);
            }
        }
    }

    fn operateur(&mut self, op: Operateur, mode: Mode) {
        match self.saisie {
            Saisie::Brouillon { .. } => {
                self.texte_courant();
                if op == Operateur::Log {
                    self.envelopper("log");
                } else {
                    self.affichage.push_str(op.symbole());
                }
                self.attente_operande = false;
            }

            // mode complexe : "3" "+" "4" "i" construit le littéral 3+4i
            Saisie::Chainee { .. }
                if mode.complexe
                    && matches!(op, Operateur::Plus | Operateur::Moins)
                    && !self.attente_operande
                    && self.valeur.is_none()
                    && litteral_ouvert(&self.affichage) =>
            {
                self.affichage.push_str(op.symbole());
            }

            Saisie::Chainee { .. } => {
                self.couper_litteral();
                self.enchainer(op);
            }
        }
    }

    /// Résout l’opération en attente avec l’opérande courant, puis met `op` en attente.
    fn enchainer(&mut self, op: Operateur) {
        let Saisie::Chainee { en_attente } = self.saisie else {
            return;
        };
        let courant = self.operande();

        let gauche = match en_attente {
            Some((gauche, precedent)) => {
                let resultat = precedent.appliquer(gauche, courant);
                self.afficher_valeur(resultat);
                resultat
            }
            None => courant,
        };
        self.saisie = Saisie::Chainee {
            en_attente: Some((gauche, op)),
        };
        self.attente_operande = true;
    }

    /// "a±b" sans 'i' final n’était pas un littéral complexe : on rejoue
    /// a, signe, b comme en calcul enchaîné ("2 * 3 - 1" => (2*3) - 1).
    fn couper_litteral(&mut self) {
        if !self.mode.complexe || self.valeur.is_some() {
            return;
        }
        let Some((a, signe, b)) = coupure_reelle(&self.affichage) else {
            return;
        };
        let b = b.to_string();

        self.afficher_valeur(Nombre::Reel(a));
        self.enchainer(signe);

        // "3-" : signe seul, on reste en attente d’opérande
        if !b.is_empty() {
            self.affichage = b;
            self.valeur = None;
            self.attente_operande = false;
        }
    }

    fn fonction(&mut self, f: Fonction, mode: Mode) {
        match self.saisie {
            Saisie::Brouillon { .. } => {
                self.texte_courant();
                self.envelopper(f.nom());
                self.attente_operande = false;
            }
            Saisie::Chainee { .. } => {
                self.couper_litteral();
                let n = f.appliquer(self.operande(), mode);
                self.afficher_valeur(n);
                self.attente_operande = true;
            }
        }
    }

    /// "sin" + "x^2" => "sin(x^2)" (transformation de texte, pas d’évaluation).
    fn envelopper(&mut self, nom: &str) {
        self.affichage = format!("{nom}({})", self.affichage);
    }

    fn egal(&mut self) {
        match self.saisie {
            Saisie::Brouillon { .. } => {
                self.texte_courant();
                let expr = preparer(&self.affichage);
                match evaluer(&expr, &Liaisons::new()) {
                    Ok(v) => {
                        self.afficher_valeur(Nombre::Reel(v));
                        self.attente_operande = true;
                    }
                    Err(e) => {
                        tracing::warn!(expr = %expr, "évaluation refusée: {e}");
                        self.afficher_erreur(format!("Error: {e}"));
                    }
                }
            }
            Saisie::Chainee { .. } => {
                self.couper_litteral();
                let Saisie::Chainee { en_attente } = self.saisie else {
                    return;
                };
                let courant = self.operande();
                let resultat = match en_attente {
                    Some((gauche, op)) => op.appliquer(gauche, courant),
                    None => courant,
                };
                self.saisie = Saisie::Chainee { en_attente: None };
                self.afficher_valeur(resultat);
                self.attente_operande = true;
            }
        }
    }

    /// Le calcul enchaîné passe d’une variante à l’autre sans être touché.
    fn basculer_algebrique(&mut self) {
        self.mode = self.mode.bascule_algebrique();
        self.saisie = match self.saisie {
            Saisie::Chainee { en_attente } => Saisie::Brouillon {
                suspendue: en_attente,
            },
            Saisie::Brouillon { suspendue } => Saisie::Chainee {
                en_attente: suspendue,
            },
        };
    }

    /* ------------------------ Valeur courante ------------------------ */

    /// Opérande courant : la valeur rendue si l’écran en est une, sinon le texte relu.
    fn operande(&self) -> Nombre {
        self.valeur.unwrap_or_else(|| lire_nombre(&self.affichage))
    }

    fn afficher_valeur(&mut self, n: Nombre) {
        self.affichage = n.to_string();
        self.valeur = Some(n);
    }

    /// Avant une édition de texte : l’écran redevient le texte exact de sa valeur
    /// (la bannière d’intégrale comprise).
    fn texte_courant(&mut self) {
        if let Some(n) = self.valeur.take() {
            self.affichage = n.to_string();
        }
    }

    /// Texte repris par les vues graphe / intégration.
    fn texte_de_l_ecran(&self) -> String {
        match self.valeur {
            Some(n) => n.to_string(),
            None => self.affichage.clone(),
        }
    }

    fn ouvrir_graphe(&mut self) {
        self.vue = Vue::Graphe;
        self.graphe.fonction = self.texte_de_l_ecran();
        self.graphe.pret = false;
        self.graphe.points = None;
    }

    fn ouvrir_integration(&mut self) {
        self.vue = Vue::Integration;
        self.integration.fonction = self.texte_de_l_ecran();
        self.integration.champ_actif = Champ::Fonction;
    }

    /* ------------------------ Vue graphe ------------------------ */

    fn jeton_graphe(&mut self, jeton: &str) -> bool {
        match jeton {
            "C" => self.reinitialiser(),
            "back" => self.vue = Vue::Standard,
            "plot" | "=" => self.valider_graphe(),
            _ => return false,
        }
        true
    }

    /// Une évaluation en x = 0 ; en cas d’échec le champ reçoit le message (pas de retour auto).
    fn valider_graphe(&mut self) {
        let texte = preparer(&self.graphe.fonction);
        let essai = Expression::compiler(&texte).and_then(|f| f.evaluer_en(0.0));

        match essai {
            Ok(_) => {
                self.graphe.pret = true;
                self.echantillonner_graphe();
                tracing::info!(fonction = %self.graphe.fonction, "tracé prêt");
            }
            Err(e) => {
                tracing::warn!(fonction = %self.graphe.fonction, "fonction refusée: {e}");
                self.graphe.fonction = format!("Error: {e}");
                self.graphe.pret = false;
                self.graphe.points = None;
            }
        }
    }

    fn echantillonner_graphe(&mut self) {
        let texte = preparer(&self.graphe.fonction);
        self.graphe.points = echantillonner(&texte, &self.graphe.fenetre).ok();
        tracing::debug!(
            points = self.graphe.points.as_ref().map_or(0, Vec::len),
            "échantillonnage"
        );
    }

    /* ------------------------ Vue intégration ------------------------ */

    fn jeton_integration(&mut self, jeton: &str) -> bool {
        match jeton {
            "C" => self.reinitialiser(),
            "back" => self.vue = Vue::Standard,
            "lower" => self.integration.champ_actif = Champ::BorneInf,
            "upper" => self.integration.champ_actif = Champ::BorneSup,
            "function" => self.integration.champ_actif = Champ::Fonction,
            "calculate" => self.calculer_integrale(),
            _ => return false,
        }
        true
    }

    fn calculer_integrale(&mut self) {
        let Integration {
            fonction,
            borne_inf,
            borne_sup,
            ..
        } = &self.integration;

        match integrer_textes(&preparer(fonction), borne_inf, borne_sup) {
            Ok(v) => {
                tracing::info!(fonction = %fonction, borne_inf = %borne_inf, borne_sup = %borne_sup, valeur = v, "intégrale");
                self.affichage = format!(
                    "∫({fonction}) = {}",
                    format_decimales(v, DECIMALES_INTEGRALE)
                );
                self.valeur = Some(Nombre::Reel(v));
                self.vue = Vue::Standard;
                self.attente_operande = true;
                self.planifier(
                    self.reglages.delai_resultat,
                    ActionDifferee::ResultatIntegration(v),
                );
            }
            Err(e) => {
                tracing::warn!(fonction = %fonction, "intégration refusée: {e}");
                self.affichage = format!("Integration error: {e}");
                self.valeur = None;
                self.attente_operande = true;
                self.planifier(self.reglages.delai_erreur, ActionDifferee::RetourStandard);
            }
        }
    }

    /* ------------------------ Minuterie ------------------------ */

    fn afficher_erreur(&mut self, message: String) {
        self.affichage = message;
        self.valeur = None;
        self.attente_operande = true;
        self.planifier(self.reglages.delai_erreur, ActionDifferee::EffacerErreur);
    }

    fn planifier(&mut self, delai: Duration, action: ActionDifferee) {
        self.compteur += 1;
        self.minuterie = Some(Minuterie {
            jeton: self.compteur,
            delai,
            action,
        });
    }

    fn appliquer_differee(&mut self, action: ActionDifferee) {
        match action {
            ActionDifferee::EffacerErreur => {
                self.affichage = "0".to_string();
                self.valeur = None;
                self.attente_operande = false;
            }
            ActionDifferee::ResultatIntegration(v) => {
                self.afficher_valeur(Nombre::Reel(v));
                self.attente_operande = true;
            }
            ActionDifferee::RetourStandard => {
                self.vue = Vue::Standard;
                self.affichage = "0".to_string();
                self.valeur = None;
                self.attente_operande = false;
            }
        }
    }
}

/* ------------------------ Outils ------------------------ */

/// Texte inséré par un chiffre / une constante.
/// φ et τ gardent leur orthographe algébrique (évaluée plus tard).
fn texte_saisi(jeton: &str) -> Option<&str> {
    match jeton {
        "φ" => Some("(1+sqrt(5))/2"),
        "τ" => Some("2*π"),
        "π" | "e" | "i" | "x" => Some(jeton),
        _ if jeton.len() == 1 && jeton.as_bytes()[0].is_ascii_digit() => Some(jeton),
        _ => None,
    }
}

/// Texte tapé relu : littéral complexe, réel, sinon expression (π, φ…) ; NaN si rien ne se lit.
fn lire_nombre(texte: &str) -> Nombre {
    if est_litteral_complexe(texte) {
        return Nombre::Complexe(parse_complexe(texte));
    }
    if let Some(x) = lire_reel(texte) {
        return Nombre::Reel(x);
    }
    Nombre::Reel(evaluer(&preparer(texte), &Liaisons::new()).unwrap_or(f64::NAN))
}

/// "a±b" réel tapé en mode complexe (pas de 'i') : (a, signe, b), b éventuellement vide.
/// Les signes d’exposant ("1e-3") ne coupent pas, le signe initial non plus.
fn coupure_reelle(texte: &str) -> Option<(f64, Operateur, &str)> {
    if texte.contains('i') {
        return None;
    }
    let (k, signe) = texte.char_indices().skip(1).find(|&(k, c)| {
        (c == '+' || c == '-') && !matches!(texte[..k].chars().last(), Some('e' | 'E'))
    })?;

    let a = lire_reel(&texte[..k])?;
    let b = &texte[k + 1..];
    if !b.is_empty() && lire_reel(b).is_none() {
        return None;
    }
    let op = if signe == '+' {
        Operateur::Plus
    } else {
        Operateur::Moins
    };
    Some((a, op, b))
}

/// Série réelle encore ouverte à une partie imaginaire : pas de 'i',
/// pas de signe interne, se termine par un chiffre ou un point.
fn litteral_ouvert(texte: &str) -> bool {
    !texte.contains('i')
        && !texte.chars().skip(1).any(|c| c == '+' || c == '-')
        && texte.ends_with(|c: char| c.is_ascii_digit() || c == '.')
}
