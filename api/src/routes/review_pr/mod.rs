pub mod review_pr_route;
