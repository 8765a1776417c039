mod dataverse_attachment_recorder;
mod mock_attachment_recorder;
mod recorder_factory;

pub use dataverse_attachment_recorder::{
    DataverseAttachmentRecorder, ENTITY_ID_HEADER, WEB_API_PATH, annotation_body,
    record_id_from_entity_ref,
};
pub use mock_attachment_recorder::MockAttachmentRecorder;
pub use recorder_factory::AttachmentRecorderFactory;
