use crate::model::{ExportFormat, ReportDimension};
use crate::service::TransportError;
use crate::session::{Operation, Session};
use crate::synth::{self, AdminMetrics};
use serde::Serialize;

pub const REPORT_DONE_MESSAGE: &str = "Reporte actualizado exitosamente";
pub const REPORT_FAILED_MESSAGE: &str = "Error al generar el reporte. Por favor intenta nuevamente.";
pub const CONFIGURATION_MESSAGE: &str =
    "Panel de configuración en desarrollo. Próximamente disponible.";

#[derive(Debug, Default)]
pub struct AdminView {
    dimension: Option<ReportDimension>,
    last_generated: Option<Option<ReportDimension>>,
    exported: Vec<ExportFormat>,
}

/// Which filter control is shown. At most one flag is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterVisibility {
    pub program: bool,
    pub instructor: bool,
    pub period: bool,
}

impl FilterVisibility {
    fn for_dimension(d: Option<ReportDimension>) -> Self {
        Self {
            program: d == Some(ReportDimension::Program),
            instructor: d == Some(ReportDimension::Instructor),
            period: d == Some(ReportDimension::Period),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSnapshot {
    pub dimension: Option<ReportDimension>,
    pub filters: FilterVisibility,
    pub metrics: AdminMetrics,
    pub last_generated: Option<Option<ReportDimension>>,
    pub exported: Vec<ExportFormat>,
}

impl AdminView {
    /// Unrecognised names hide every filter.
    pub fn select_dimension(&mut self, name: &str) -> FilterVisibility {
        self.dimension = ReportDimension::parse(name);
        FilterVisibility::for_dimension(self.dimension)
    }

    pub fn generate(&mut self, s: &mut Session) {
        let label = self.dimension.map(ReportDimension::as_str).unwrap_or("");
        s.feedback
            .show_loading(format!("Generando reporte {}...", label));
        let delay = s.delays.admin_generate;
        s.schedule(delay, Operation::GenerateReport(self.dimension));
    }

    pub fn complete_generate(
        &mut self,
        s: &mut Session,
        dimension: Option<ReportDimension>,
        outcome: Result<(), TransportError>,
    ) {
        s.feedback.hide_loading();
        match outcome {
            Ok(()) => {
                self.last_generated = Some(dimension);
                s.feedback.show_modal(REPORT_DONE_MESSAGE, None);
            }
            Err(e) => {
                log::warn!("report generation failed: {}", e);
                s.feedback.show_modal(REPORT_FAILED_MESSAGE, None);
            }
        }
    }

    pub fn export(&mut self, s: &mut Session, format: ExportFormat) {
        s.feedback
            .show_loading(format!("Exportando a {}...", format.label()));
        let delay = s.delays.admin_export;
        s.schedule(delay, Operation::ExportReport(format));
    }

    pub fn complete_export(
        &mut self,
        s: &mut Session,
        format: ExportFormat,
        outcome: Result<(), TransportError>,
    ) {
        s.feedback.hide_loading();
        match outcome {
            Ok(()) => {
                self.exported.push(format);
                s.feedback.show_modal(
                    format!("Archivo {} exportado exitosamente", format.label()),
                    None,
                );
            }
            Err(e) => {
                log::warn!("export failed: {}", e);
                s.feedback.show_modal(
                    format!("Error al exportar {}. Por favor intenta nuevamente.", format.label()),
                    None,
                );
            }
        }
    }

    pub fn configuration(&self, s: &mut Session) {
        s.feedback.show_modal(CONFIGURATION_MESSAGE, None);
    }

    pub fn snapshot(&self) -> AdminSnapshot {
        AdminSnapshot {
            dimension: self.dimension,
            filters: FilterVisibility::for_dimension(self.dimension),
            metrics: synth::admin_metrics(),
            last_generated: self.last_generated,
            exported: self.exported.clone(),
        }
    }
}
