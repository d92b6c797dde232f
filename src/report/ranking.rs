//! Employee ranking by ROI.

use std::cmp::Ordering;

use crate::models::EmployeeRoi;

/// Orders ROI values descending with absent values last.
///
/// An absent ROI means no cost has been incurred, which is not the same
/// as breaking even, so it never ties with `Some(0.0)`.
pub fn compare_roi_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Returns up to `limit` employees by ROI descending, ties broken by id.
///
/// # Example
///
/// ```
/// use workforce_analytics::models::EmployeeRoi;
/// use workforce_analytics::report::top_by_roi;
///
/// let row = |id, roi| EmployeeRoi {
///     employee_id: id,
///     employee_name: format!("E{id}"),
///     department: None,
///     total_hours: 1.0,
///     total_cost: 1.0,
///     total_revenue: 1.0,
///     roi,
/// };
/// let rows = vec![row(1, None), row(2, Some(0.0)), row(3, Some(2.5))];
/// let ids: Vec<i64> = top_by_roi(&rows, 5).iter().map(|r| r.employee_id).collect();
/// assert_eq!(ids, vec![3, 2, 1]);
/// ```
pub fn top_by_roi(rows: &[EmployeeRoi], limit: usize) -> Vec<&EmployeeRoi> {
    let mut ranked: Vec<&EmployeeRoi> = rows.iter().collect();
    ranked.sort_by(|a, b| {
        compare_roi_desc(a.roi, b.roi).then(a.employee_id.cmp(&b.employee_id))
    });
    ranked.truncate(limit);
    ranked
}
