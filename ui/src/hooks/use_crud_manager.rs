use std::cell::RefCell;
use std::rc::Rc;

use content::{
    CrudBackend, CrudManager, HomeCache, Resource, manager::AcceptsUploads,
};
use payloads::{APIClient, LocationId, requests::UploadFile};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{State, contexts::toast::use_toast};

pub struct CrudHandle<R: Resource> {
    pub manager: CrudManager<R>,
    /// A save, delete or upload is running.
    pub busy: bool,
    pub start_create: Callback<()>,
    pub start_edit: Callback<R::Id>,
    pub cancel: Callback<()>,
    /// Replace the draft's input with an edited copy.
    pub edit_draft: Callback<R::Input>,
    pub submit: Callback<()>,
    /// Create one record per input, as in a bulk gallery upload.
    pub create_many: Callback<Vec<R::Input>>,
    pub delete: Callback<R::Id>,
    pub upload: Callback<Vec<UploadFile>>,
}

/// Shared plumbing for the callbacks: the current manager, a way to
/// re-render after changing it, and the busy flag.
#[derive(Clone)]
struct ManagerCell<R: Resource> {
    manager: Rc<RefCell<CrudManager<R>>>,
    busy: UseStateHandle<bool>,
    redraw: UseForceUpdateHandle,
}

impl<R: Resource> ManagerCell<R> {
    fn update(&self, change: impl FnOnce(&mut CrudManager<R>)) {
        change(&mut self.manager.borrow_mut());
        self.redraw.force_update();
    }

    /// Run an async operation on a copy of the manager and store the result.
    /// The RefCell cannot stay borrowed across the await.
    fn run<F, Fut>(&self, operation: F)
    where
        F: FnOnce(CrudManager<R>) -> Fut + 'static,
        Fut: std::future::Future<Output = CrudManager<R>> + 'static,
    {
        let cell = self.clone();
        let snapshot = self.manager.borrow().clone();
        yew::platform::spawn_local(async move {
            cell.busy.set(true);
            let updated = operation(snapshot).await;
            // a scope change while this ran already reset the manager
            cell.manager.borrow_mut().absorb(updated);
            cell.busy.set(false);
            cell.redraw.force_update();
        });
    }
}

/// A back-office CRUD manager bound to the signed-in admin's client.
///
/// The list is loaded on mount and again whenever `scope` changes. Every
/// successful mutation drops the home page cache so visitors see it.
#[hook]
pub fn use_crud_manager<R>(scope: Option<LocationId>) -> CrudHandle<R>
where
    R: Resource,
    R::Input: AcceptsUploads,
    APIClient: CrudBackend<R>,
{
    let (state, _) = use_store::<State>();
    let client = state.client();
    let home_cache = use_context::<HomeCache>();
    let toast = use_toast();

    let cell = ManagerCell {
        manager: use_mut_ref(|| CrudManager::<R>::new(scope)),
        busy: use_state(|| false),
        redraw: use_force_update(),
    };

    {
        let cell = cell.clone();
        let client = client.clone();
        use_effect_with(scope, move |scope| {
            *cell.manager.borrow_mut() = CrudManager::new(*scope);
            cell.run(move |mut manager| async move {
                let _ = manager.reload(&client).await;
                manager
            });
        });
    }

    let on_saved = {
        let toast = toast.clone();
        Rc::new(move |message: &str| {
            if let Some(cache) = &home_cache {
                cache.invalidate();
            }
            toast.success(message);
        })
    };

    let start_create = {
        let cell = cell.clone();
        Callback::from(move |_| cell.update(|m| m.start_create()))
    };

    let start_edit = {
        let cell = cell.clone();
        Callback::from(move |id: R::Id| {
            cell.update(|m| {
                m.start_edit(id);
            })
        })
    };

    let cancel = {
        let cell = cell.clone();
        Callback::from(move |_| cell.update(|m| m.cancel_edit()))
    };

    let edit_draft = {
        let cell = cell.clone();
        Callback::from(move |input: R::Input| {
            cell.update(|m| m.update_draft(|draft| *draft = input))
        })
    };

    let submit = {
        let cell = cell.clone();
        let client = client.clone();
        let on_saved = on_saved.clone();
        Callback::from(move |_| {
            let client = client.clone();
            let on_saved = on_saved.clone();
            cell.run(move |mut manager| async move {
                if manager.submit(&client).await.is_ok() {
                    on_saved("Cambios guardados");
                }
                manager
            });
        })
    };

    let create_many = {
        let cell = cell.clone();
        let client = client.clone();
        let on_saved = on_saved.clone();
        let toast = toast.clone();
        Callback::from(move |inputs: Vec<R::Input>| {
            let client = client.clone();
            let on_saved = on_saved.clone();
            let toast = toast.clone();
            cell.run(move |mut manager| async move {
                match manager.create_each(&client, inputs).await {
                    Ok(count) => on_saved(&format!("{count} elementos creados")),
                    Err(_) => toast.error(content::manager::SAVE_ERROR_MESSAGE),
                }
                manager
            });
        })
    };

    let delete = {
        let cell = cell.clone();
        let client = client.clone();
        let toast = toast.clone();
        Callback::from(move |id: R::Id| {
            let client = client.clone();
            let on_saved = on_saved.clone();
            let toast = toast.clone();
            cell.run(move |mut manager| async move {
                match manager.delete(&client, id).await {
                    Ok(()) => on_saved("Elemento eliminado"),
                    Err(_) => toast.error(
                        content::manager::DELETE_ERROR_MESSAGE,
                    ),
                }
                manager
            });
        })
    };

    let upload = {
        let cell = cell.clone();
        Callback::from(move |files: Vec<UploadFile>| {
            let client = client.clone();
            let toast = toast.clone();
            cell.run(move |mut manager| async move {
                if manager.upload_into_draft(&client, files).await.is_err() {
                    toast.error(content::manager::UPLOAD_ERROR_MESSAGE);
                }
                manager
            });
        })
    };

    let manager = cell.manager.borrow().clone();
    CrudHandle {
        manager,
        busy: *cell.busy,
        start_create,
        start_edit,
        cancel,
        edit_draft,
        submit,
        create_many,
        delete,
        upload,
    }
}
