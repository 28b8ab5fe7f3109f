use crate::components::design_system::{Button, LinkButton};
use crate::models::{LoggedIn, PromptView, ReloadWatch, SavePromptModel, SubmitButtonState};
use crate::services::Backends;
use dioxus::dioxus_core::spawn_forever;
use dioxus::prelude::*;
use dioxus_i18n::t;
use sprig_auth::{
    persist, submit_code, submit_email, use_auth_helper, AuthHelper, PersistenceState, CODE_LENGTH,
};

const BACKDROP_STYLE: &str =
    "position: fixed; inset: 0; display: flex; justify-content: flex-end; align-items: flex-start; padding: 56px 16px 0 0;";
const POPUP_STYLE: &str = "max-width: 360px; padding: 16px; background: #ffffff; border-radius: 8px; box-shadow: 0 4px 16px rgba(0, 0, 0, 0.2);";
const INPUT_ROW_STYLE: &str = "display: flex; gap: 8px; margin: 8px 0;";
const INPUT_STYLE: &str = "flex: 1; padding: 8px; border: 1px solid #ccc; border-radius: 6px; font-size: 14px;";

fn reload_page() {
    log::info!("SavePrompt: cloud save confirmed, reloading");
    let reload = document::eval("window.location.reload();");
    spawn(async move {
        if let Err(e) = reload.await {
            log::warn!("SavePrompt: page reload failed: {}", e);
        }
    });
}

/// Call `reload` the first time persistence reports a finished cloud save
/// after the returned watch is armed
///
/// The effect lives in the calling scope, so an unmounted caller never reloads.
fn use_reload_on_cloud_save(
    persistence_state: Signal<PersistenceState>,
    reload: Callback<()>,
) -> Signal<ReloadWatch> {
    let mut watch = use_signal(ReloadWatch::default);
    use_effect(move || {
        let state = persistence_state();
        if watch.write().observe(&state) {
            reload.call(());
        }
    });
    watch
}

/// Send the email, hand the work to the cloud and move the prompt forward
///
/// Runs in the root scope; prompt state is only touched if it still exists.
async fn email_submitted(
    auth: Signal<AuthHelper>,
    persistence_state: Signal<PersistenceState>,
    mut model: Signal<SavePromptModel>,
    backends: Backends,
) {
    submit_email(auth, backends.auth.clone()).await;
    let Ok(helper) = auth.try_peek().map(|helper| AuthHelper::clone(&helper)) else {
        log::debug!("SavePrompt: auth helper closed before email answer");
        return;
    };

    persist(persistence_state, &helper.email, backends.persistence.clone());
    if let Ok(mut model) = model.try_write() {
        model.after_email_submit(&helper);
    }
}

/// Send the login code; on success arm the reload watch and reload right
/// away if the cloud copy is already saved
async fn code_submitted(
    auth: Signal<AuthHelper>,
    persistence_state: Signal<PersistenceState>,
    mut model: Signal<SavePromptModel>,
    mut reload_watch: Signal<ReloadWatch>,
    reload: Callback<()>,
    backends: Backends,
) {
    submit_code(auth, backends.auth.clone()).await;
    let Ok(helper) = auth.try_peek().map(|helper| AuthHelper::clone(&helper)) else {
        log::debug!("SavePrompt: auth helper closed before code answer");
        return;
    };

    let logged_in = match model.try_write() {
        Ok(mut model) => model.after_code_submit(&helper),
        Err(_) => {
            log::debug!("SavePrompt: closed before login finished, not reloading");
            return;
        }
    };
    if !logged_in {
        return;
    }

    let fire = match reload_watch.try_write() {
        Ok(mut watch) => {
            watch.arm();
            watch.observe(&persistence_state.peek())
        }
        Err(_) => false,
    };
    if fire {
        reload.call(());
    }
}

/// Popup that asks an anonymous user for an email and login code so their
/// work can be saved to the cloud
///
/// Shows exactly one of: a confirmation, the email form, the code form, or
/// nothing (while the auth helper is still in `EmailEntry`). Pass `auth` to
/// drive the helper from outside; otherwise the prompt owns one. `on_reload`
/// replaces the page reload that follows a completed login.
#[component]
pub fn SavePrompt(
    logged_in: LoggedIn,
    persistence_state: Signal<PersistenceState>,
    on_close: EventHandler<()>,
    auth: Option<Signal<AuthHelper>>,
    on_reload: Option<EventHandler<()>>,
) -> Element {
    let backends = use_context::<Backends>();
    let own_auth = use_auth_helper(logged_in.initial_stage());
    let mut auth = auth.unwrap_or(own_auth);
    let mut model = use_signal(SavePromptModel::default);
    let reload = use_callback(move |_: ()| match on_reload {
        Some(handler) => handler.call(()),
        None => reload_page(),
    });
    let reload_watch = use_reload_on_cloud_save(persistence_state, reload);

    // Submissions outlive the popup; closing it must not strand the spinner
    // or the cloud save
    let on_email_submit = {
        let backends = backends.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            spawn_forever(email_submitted(
                auth,
                persistence_state,
                model,
                backends.clone(),
            ));
        }
    };

    let on_code_submit = {
        let backends = backends.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            spawn_forever(code_submitted(
                auth,
                persistence_state,
                model,
                reload_watch,
                reload,
                backends.clone(),
            ));
        }
    };

    let helper = auth.read().clone();
    let view = model
        .read()
        .view(&helper, logged_in, &persistence_state.read());

    let content = match view {
        PromptView::Confirmation(copy) => rsx! {
            p { {t!(copy.message_id(), status: t!(copy.status_id()))} }
            Button { accent: true, onclick: move |_| on_close.call(()), {t!("prompt-done")} }
        },
        PromptView::EmailForm => {
            let submit = SubmitButtonState::for_email(&helper);
            rsx! {
                form { onsubmit: on_email_submit,
                    p { {t!("prompt-email-intro")} }
                    div { style: INPUT_ROW_STYLE,
                        input {
                            style: INPUT_STYLE,
                            r#type: "email",
                            autocomplete: "email",
                            placeholder: t!("prompt-email-placeholder"),
                            value: "{helper.email}",
                            oninput: move |evt| auth.write().email = evt.value(),
                        }
                        Button {
                            accent: true,
                            r#type: "submit",
                            disabled: submit.disabled,
                            loading: submit.loading,
                            {t!("prompt-next")}
                        }
                    }
                }
            }
        }
        PromptView::CodeForm { show_error } => {
            let submit = SubmitButtonState::for_code(&helper);
            rsx! {
                form { onsubmit: on_code_submit,
                    p { {t!("prompt-code-intro")} }
                    div { style: INPUT_ROW_STYLE,
                        input {
                            style: INPUT_STYLE,
                            r#type: "text",
                            inputmode: "numeric",
                            maxlength: "{CODE_LENGTH}",
                            placeholder: t!("prompt-code-placeholder"),
                            value: "{helper.code}",
                            oninput: move |evt| auth.write().code = evt.value(),
                        }
                        Button {
                            accent: true,
                            r#type: "submit",
                            disabled: submit.disabled,
                            loading: submit.loading,
                            {t!("prompt-log-in")}
                        }
                    }
                    if show_error {
                        p { style: "margin: 0 0 8px 0; color: #c62828; font-size: 13px;",
                            {t!("prompt-code-incorrect")}
                        }
                    }
                    p { style: "margin: 0; color: #8492a6; font-size: 13px;",
                        {t!("prompt-skip-intro")}
                        " "
                        LinkButton {
                            disabled: helper.is_loading,
                            onclick: move |_| model.write().skip(),
                            {t!("prompt-skip")}
                        }
                    }
                }
            }
        }
        PromptView::Empty => rsx! {},
    };

    rsx! {
        // Clicking outside the popup closes it
        div { style: BACKDROP_STYLE, onclick: move |_| on_close.call(()),
            div {
                class: "save-prompt",
                style: POPUP_STYLE,
                onclick: move |evt| evt.stop_propagation(),
                {content}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dioxus::dioxus_core::NoOpMutations;
    use sprig_auth::{
        AuthBackend, AuthError, AuthStage, CloudSaveState, PersistError, PersistenceBackend,
    };
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    /// Accepts every save and the code "123456"; emails only when `email_ok`
    struct TestBackend {
        email_ok: bool,
        delay_ms: u64,
    }

    impl TestBackend {
        async fn wait(&self) {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    #[async_trait(?Send)]
    impl AuthBackend for TestBackend {
        async fn submit_email(&self, _email: &str) -> Result<(), AuthError> {
            self.wait().await;
            if self.email_ok {
                Ok(())
            } else {
                Err(AuthError::Rejected)
            }
        }

        async fn submit_code(&self, _email: &str, code: &str) -> Result<(), AuthError> {
            self.wait().await;
            if code == "123456" {
                Ok(())
            } else {
                Err(AuthError::Rejected)
            }
        }
    }

    #[async_trait(?Send)]
    impl PersistenceBackend for TestBackend {
        async fn save_to_cloud(&self, _email: &str) -> Result<(), PersistError> {
            self.wait().await;
            Ok(())
        }
    }

    fn backends(email_ok: bool, delay_ms: u64) -> Backends {
        let backend = Rc::new(TestBackend { email_ok, delay_ms });
        Backends {
            auth: backend.clone(),
            persistence: backend,
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Snapshot {
        stage: AuthStage,
        is_loading: bool,
        ghost_stage: Option<bool>,
        persistence: PersistenceState,
        reloads: usize,
    }

    thread_local! {
        static RELOADS: Cell<usize> = const { Cell::new(0) };
        static SEEN: RefCell<Vec<Snapshot>> = const { RefCell::new(Vec::new()) };
    }

    fn reset() {
        RELOADS.with(|reloads| reloads.set(0));
        SEEN.with(|seen| seen.borrow_mut().clear());
    }

    fn count_reload() {
        RELOADS.with(|reloads| reloads.set(reloads.get() + 1));
    }

    fn record(
        auth: Signal<AuthHelper>,
        persistence: Signal<PersistenceState>,
        model: Option<Signal<SavePromptModel>>,
    ) {
        let helper = auth.peek();
        let snapshot = Snapshot {
            stage: helper.stage,
            is_loading: helper.is_loading,
            ghost_stage: model.map(|model| model.peek().ghost_stage()),
            persistence: *persistence.peek(),
            reloads: RELOADS.with(Cell::get),
        };
        SEEN.with(|seen| seen.borrow_mut().push(snapshot));
    }

    fn seen() -> Vec<Snapshot> {
        SEEN.with(|seen| seen.borrow().clone())
    }

    fn saving() -> PersistenceState {
        PersistenceState::Persisted {
            cloud_save_state: CloudSaveState::Saving,
        }
    }

    fn saved() -> PersistenceState {
        PersistenceState::Persisted {
            cloud_save_state: CloudSaveState::Saved,
        }
    }

    fn email_helper() -> AuthHelper {
        AuthHelper::new(AuthStage::Email).with_email("fiona@hackclub.com")
    }

    fn code_helper() -> AuthHelper {
        let mut helper = AuthHelper::new(AuthStage::Code).with_email("fiona@hackclub.com");
        helper.code = "123456".to_string();
        helper
    }

    async fn run_for(dom: &mut VirtualDom, ms: u64) {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(ms);
        loop {
            tokio::select! {
                _ = dom.wait_for_work() => dom.render_immediate(&mut NoOpMutations),
                _ = tokio::time::sleep_until(deadline) => break,
            }
        }
    }

    async fn run(root: fn() -> Element, ms: u64) -> Vec<Snapshot> {
        reset();
        let mut dom = VirtualDom::new(root);
        dom.rebuild_in_place();
        run_for(&mut dom, ms).await;
        seen()
    }

    #[component]
    fn RejectedEmail() -> Element {
        let auth = use_signal(email_helper);
        let persistence = use_signal(PersistenceState::default);
        let model = use_signal(SavePromptModel::default);
        use_hook(|| {
            spawn(async move {
                email_submitted(auth, persistence, model, backends(false, 1)).await;
                record(auth, persistence, Some(model));
                tokio::time::sleep(Duration::from_millis(20)).await;
                record(auth, persistence, Some(model));
            });
        });
        rsx! {}
    }

    #[tokio::test]
    async fn test_rejected_email_still_saves_and_skips_ahead() {
        let seen = run(RejectedEmail, 60).await;

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].ghost_stage, Some(true));
        assert!(!seen[0].is_loading);
        assert_eq!(seen[0].persistence, saving());
        assert_eq!(seen[1].persistence, saved());
    }

    #[component]
    fn AcceptedEmail() -> Element {
        let auth = use_signal(email_helper);
        let persistence = use_signal(PersistenceState::default);
        let model = use_signal(SavePromptModel::default);
        use_hook(|| {
            spawn(async move {
                email_submitted(auth, persistence, model, backends(true, 1)).await;
                record(auth, persistence, Some(model));
            });
        });
        rsx! {}
    }

    #[tokio::test]
    async fn test_accepted_email_moves_to_code_form() {
        let seen = run(AcceptedEmail, 30).await;

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].stage, AuthStage::Code);
        assert_eq!(seen[0].ghost_stage, Some(false));
        assert_eq!(seen[0].persistence, saving());
    }

    #[component]
    fn LoginWhenSaved() -> Element {
        let auth = use_signal(code_helper);
        let mut persistence = use_signal(saved);
        let model = use_signal(SavePromptModel::default);
        let reload = use_callback(|_: ()| count_reload());
        let watch = use_reload_on_cloud_save(persistence, reload);
        use_hook(|| {
            spawn(async move {
                code_submitted(auth, persistence, model, watch, reload, backends(true, 1)).await;
                record(auth, persistence, Some(model));
                persistence.set(saved());
                tokio::time::sleep(Duration::from_millis(5)).await;
                record(auth, persistence, Some(model));
            });
        });
        rsx! {}
    }

    #[tokio::test]
    async fn test_login_reloads_at_once_when_already_saved() {
        let seen = run(LoginWhenSaved, 40).await;

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].stage, AuthStage::LoggedIn);
        assert_eq!(seen[0].reloads, 1);
        assert_eq!(seen[1].reloads, 1);
    }

    #[component]
    fn LoginWhileSaving() -> Element {
        let auth = use_signal(code_helper);
        let mut persistence = use_signal(saving);
        let model = use_signal(SavePromptModel::default);
        let reload = use_callback(|_: ()| count_reload());
        let watch = use_reload_on_cloud_save(persistence, reload);
        use_hook(|| {
            spawn(async move {
                code_submitted(auth, persistence, model, watch, reload, backends(true, 1)).await;
                record(auth, persistence, Some(model));
                persistence.set(saved());
                tokio::time::sleep(Duration::from_millis(5)).await;
                record(auth, persistence, Some(model));
                persistence.set(saved());
                tokio::time::sleep(Duration::from_millis(5)).await;
                record(auth, persistence, Some(model));
            });
        });
        rsx! {}
    }

    #[tokio::test]
    async fn test_login_reloads_once_when_save_completes() {
        let seen = run(LoginWhileSaving, 50).await;

        let reloads: Vec<usize> = seen.iter().map(|snapshot| snapshot.reloads).collect();
        assert_eq!(reloads, vec![0, 1, 1]);
    }

    #[component]
    fn WrongCode() -> Element {
        let mut auth = use_signal(code_helper);
        let persistence = use_signal(saved);
        let model = use_signal(SavePromptModel::default);
        let reload = use_callback(|_: ()| count_reload());
        let watch = use_reload_on_cloud_save(persistence, reload);
        use_hook(|| {
            auth.write().code = "000000".to_string();
            spawn(async move {
                code_submitted(auth, persistence, model, watch, reload, backends(true, 1)).await;
                record(auth, persistence, Some(model));
            });
        });
        rsx! {}
    }

    #[tokio::test]
    async fn test_wrong_code_never_reloads() {
        let seen = run(WrongCode, 30).await;

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].stage, AuthStage::Code);
        assert_eq!(seen[0].reloads, 0);
    }

    /// Stands in for the popup: owns the model and the reload watch, and
    /// starts its submission the way the form handlers do
    #[component]
    fn Popup(
        auth: Signal<AuthHelper>,
        persistence_state: Signal<PersistenceState>,
        code: bool,
    ) -> Element {
        let model = use_signal(SavePromptModel::default);
        let reload = use_callback(|_: ()| count_reload());
        let watch = use_reload_on_cloud_save(persistence_state, reload);
        use_hook(|| {
            let backends = backends(true, 20);
            if code {
                spawn_forever(code_submitted(
                    auth,
                    persistence_state,
                    model,
                    watch,
                    reload,
                    backends,
                ));
            } else {
                spawn_forever(email_submitted(auth, persistence_state, model, backends));
            }
        });
        rsx! {}
    }

    #[component]
    fn CloseDuringEmail() -> Element {
        let auth = use_signal(email_helper);
        let persistence = use_signal(PersistenceState::default);
        let mut open = use_signal(|| true);
        use_hook(|| {
            spawn(async move {
                tokio::time::sleep(Duration::from_millis(2)).await;
                record(auth, persistence, None);
                open.set(false);
                tokio::time::sleep(Duration::from_millis(80)).await;
                record(auth, persistence, None);
            });
        });
        rsx! {
            if open() {
                Popup { auth, persistence_state: persistence, code: false }
            }
        }
    }

    #[tokio::test]
    async fn test_closing_during_email_still_finishes_and_saves() {
        let seen = run(CloseDuringEmail, 150).await;

        assert_eq!(seen.len(), 2);
        assert!(seen[0].is_loading);
        assert_eq!(seen[1].stage, AuthStage::Code);
        assert!(!seen[1].is_loading);
        assert_eq!(seen[1].persistence, saved());
    }

    #[component]
    fn CloseDuringLogin() -> Element {
        let auth = use_signal(code_helper);
        let mut persistence = use_signal(saving);
        let mut open = use_signal(|| true);
        use_hook(|| {
            spawn(async move {
                tokio::time::sleep(Duration::from_millis(2)).await;
                open.set(false);
                tokio::time::sleep(Duration::from_millis(40)).await;
                persistence.set(saved());
                tokio::time::sleep(Duration::from_millis(10)).await;
                record(auth, persistence, None);
            });
        });
        rsx! {
            if open() {
                Popup { auth, persistence_state: persistence, code: true }
            }
        }
    }

    #[tokio::test]
    async fn test_closed_prompt_never_reloads() {
        let seen = run(CloseDuringLogin, 100).await;

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].stage, AuthStage::LoggedIn);
        assert!(!seen[0].is_loading);
        assert_eq!(seen[0].reloads, 0);
    }
}
